//! Person identifiers and the counters that generate them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::person::Role;

/// Identifier of a person, e.g. `ST001` or `FL012`.
///
/// Ids are assigned once at creation and never reused. Parsing user input
/// trims and upper-cases it, so `" fl001"` names the same person as `FL001`.
///
/// # Examples
///
/// ```
/// use amity::PersonId;
///
/// let id: PersonId = "st001".parse().unwrap();
/// assert_eq!(id.as_str(), "ST001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    fn generate(role: Role, sequence: u32) -> Self {
        Self(format!("{}{sequence:03}", role.id_prefix()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PersonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(Error::Validation {
                field: "person_id".into(),
                message: "person id must be non-empty".into(),
            });
        }
        Ok(Self(normalized))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-role id counters.
///
/// Each role counts independently from 1. The counters are part of the
/// saved state so a restored registry resumes where it left off.
///
/// # Examples
///
/// ```
/// use amity::{IdGenerator, Role};
///
/// let mut ids = IdGenerator::default();
/// assert_eq!(ids.next(Role::Staff).as_str(), "ST001");
/// assert_eq!(ids.next(Role::Fellow).as_str(), "FL001");
/// assert_eq!(ids.next(Role::Staff).as_str(), "ST002");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    staff: u32,
    fellow: u32,
}

impl IdGenerator {
    /// Resumes counting from previously issued values.
    #[must_use]
    pub const fn resume(staff: u32, fellow: u32) -> Self {
        Self { staff, fellow }
    }

    /// Issues the next id for `role`.
    pub fn next(&mut self, role: Role) -> PersonId {
        let counter = match role {
            Role::Staff => &mut self.staff,
            Role::Fellow => &mut self.fellow,
        };
        *counter += 1;
        PersonId::generate(role, *counter)
    }

    /// Returns the last value issued for `role` (0 if none).
    #[must_use]
    pub const fn last_issued(&self, role: Role) -> u32 {
        match role {
            Role::Staff => self.staff,
            Role::Fellow => self.fellow,
        }
    }
}
