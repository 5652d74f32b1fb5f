//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use amity::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// Semantic failure reported by the CLI itself - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (room full, invalid relocation, unknown person...)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                e if e.is_rejection() => 1,
                LibError::StoreNotFound { .. } => 1,
                LibError::Validation { .. } | LibError::BatchFormat { .. } => 4,
                LibError::Io(_) => 5,
                LibError::Configuration(_) => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amity::RoomKind;

    #[test]
    fn test_rejections_are_semantic_failures() {
        let full = CliError::from(LibError::RoomFull {
            room: "Blue".into(),
            capacity: 6,
        });
        assert_eq!(full.exit_code(), 1);

        let mismatch = CliError::from(LibError::NotAllocated {
            person_id: "ST001".into(),
            kind: RoomKind::Office,
        });
        assert_eq!(mismatch.exit_code(), 1);
    }

    #[test]
    fn test_input_errors_are_invalid_arguments() {
        let err = CliError::from(LibError::BatchFormat {
            line: 3,
            reason: "bad".into(),
        });
        assert_eq!(err.exit_code(), 4);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);
    }

    #[test]
    fn test_other_codes() {
        let io = CliError::from(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 5);
        assert_eq!(CliError::Config("bad".into()).exit_code(), 7);

        let corrupt = CliError::from(LibError::DatabaseCorruption {
            details: "x".into(),
        });
        assert_eq!(corrupt.exit_code(), 6);
    }
}
