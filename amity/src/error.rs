//! Error types for the amity library.
//!
//! This module provides the error hierarchy for all registry, allocation and
//! persistence operations, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::room::RoomKind;

/// Result type alias for operations that may fail with an amity error.
///
/// # Examples
///
/// ```
/// use amity::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(6)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the amity library.
///
/// Every engine operation validates before it mutates, so any of these
/// errors leaves the registries exactly as they were before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// A room with the same name already exists (offices and living spaces
    /// share one namespace).
    #[error("room '{name}' already exists")]
    DuplicateName {
        /// The conflicting room name.
        name: String,
    },

    /// The requested person or room was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The relocation target has no spare capacity.
    #[error("room '{room}' is full ({capacity} occupants)")]
    RoomFull {
        /// Name of the full room.
        room: String,
        /// Capacity of the room.
        capacity: usize,
    },

    /// The relocation is not allowed for this person and room.
    #[error("invalid relocation: {details}")]
    InvalidRelocation {
        /// Why the relocation was rejected.
        details: String,
    },

    /// The person holds no room of the target kind to relocate out of.
    #[error("{person_id} has no other {kind} to relocate from")]
    NotAllocated {
        /// The person being relocated.
        person_id: String,
        /// The kind of room the relocation targets.
        kind: RoomKind,
    },

    /// The person's current room and the destination are of different kinds.
    #[error("can only relocate between rooms of the same kind: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind of the destination room.
        expected: RoomKind,
        /// Kind of the room currently held.
        found: RoomKind,
    },

    /// No state store exists at the requested location.
    #[error("cannot open state store at {}", path.display())]
    StoreNotFound {
        /// The location that was requested.
        path: PathBuf,
    },

    /// A stored snapshot violates registry invariants.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },

    /// A line of a people file could not be parsed.
    #[error("invalid record on line {line}: {reason}")]
    BatchFormat {
        /// One-based line number of the record.
        line: usize,
        /// What is wrong with the record.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error indicates a missing person or room.
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::Error;
    ///
    /// let err = Error::NotFound { resource: "room 'Blue'".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a rejected allocation request rather than a
    /// storage or environment failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::Error;
    ///
    /// let err = Error::RoomFull { room: "Blue".to_string(), capacity: 6 };
    /// assert!(err.is_rejection());
    /// ```
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName { .. }
                | Self::NotFound { .. }
                | Self::RoomFull { .. }
                | Self::InvalidRelocation { .. }
                | Self::NotAllocated { .. }
                | Self::TypeMismatch { .. }
        )
    }
}
