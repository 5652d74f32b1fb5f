//! People: staff and fellows, and their room assignments.
//!
//! A person's role decides which rooms they can hold. Staff only ever hold
//! an office; fellows hold an office and, if they asked for accommodation,
//! a living space. The [`Person`] type encodes this so a staff member cannot
//! carry a living space at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::PersonId;
use crate::room::RoomKind;

/// The role of a person.
///
/// # Examples
///
/// ```
/// use amity::Role;
///
/// assert_eq!("fellow".parse::<Role>().unwrap(), Role::Fellow);
/// assert_eq!("STAFF".parse::<Role>().unwrap(), Role::Staff);
/// assert_eq!(Role::Fellow.to_string(), "FELLOW");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Staff member: office only.
    Staff,
    /// Fellow: office, plus a living space on request.
    Fellow,
}

impl Role {
    /// Both roles, staff first.
    pub const ALL: [Self; 2] = [Self::Staff, Self::Fellow];

    /// Two-letter prefix of ids issued for this role.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Staff => "ST",
            Self::Fellow => "FL",
        }
    }

    /// Returns `true` if people of this role may occupy rooms of `kind`.
    #[must_use]
    pub const fn may_occupy(self, kind: RoomKind) -> bool {
        !matches!((self, kind), (Self::Staff, RoomKind::LivingSpace))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff => write!(f, "STAFF"),
            Self::Fellow => write!(f, "FELLOW"),
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "STAFF" => Ok(Self::Staff),
            "FELLOW" => Ok(Self::Fellow),
            _ => Err(Error::Validation {
                field: "role".into(),
                message: format!("role should be STAFF or FELLOW, got '{s}'"),
            }),
        }
    }
}

/// Whether a fellow asked for a living space when created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accommodation {
    /// `Y`: a living space was requested.
    #[serde(rename = "Y")]
    Requested,
    /// `N`: no living space wanted.
    #[default]
    #[serde(rename = "N")]
    NotRequested,
}

impl Accommodation {
    /// The single-letter token used in files and storage.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Requested => "Y",
            Self::NotRequested => "N",
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Accommodation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "Y" | "YES" => Ok(Self::Requested),
            "N" | "NO" => Ok(Self::NotRequested),
            _ => Err(Error::Validation {
                field: "accommodation".into(),
                message: format!("accommodation should be Y or N, got '{s}'"),
            }),
        }
    }
}

/// Rule deciding when a fellow counts as fully allocated.
///
/// Staff are fully allocated once they hold an office under either rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FellowAllocationRule {
    /// A fellow needs both an office and a living space, whatever they asked for.
    #[default]
    Strict,
    /// A fellow needs an office, plus a living space only if they asked for one.
    Accommodation,
}

impl FromStr for FellowAllocationRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "accommodation" => Ok(Self::Accommodation),
            _ => Err(Error::Validation {
                field: "fellow_rule".into(),
                message: format!("unknown fellow rule '{s}' (expected strict or accommodation)"),
            }),
        }
    }
}

impl fmt::Display for FellowAllocationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Accommodation => write!(f, "accommodation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
enum Placement {
    Staff,
    Fellow {
        accommodation: Accommodation,
        living_space: Option<String>,
    },
}

/// A staff member or fellow with their current room assignments.
///
/// Room assignments are room names; the rooms themselves live in the room
/// registry.
///
/// # Examples
///
/// ```
/// use amity::{Accommodation, Person, PersonId, Role};
///
/// let id: PersonId = "FL001".parse().unwrap();
/// let fellow = Person::fellow(id, "Jane Doe", Accommodation::Requested).unwrap();
/// assert_eq!(fellow.role(), Role::Fellow);
/// assert!(fellow.wants_living_space());
/// assert_eq!(fellow.office(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    office: Option<String>,
    #[serde(flatten)]
    placement: Placement,
}

impl Person {
    /// Creates an unassigned staff member.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty after trimming.
    pub fn staff(id: PersonId, name: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            id,
            name: validate_name(name.as_ref())?,
            office: None,
            placement: Placement::Staff,
        })
    }

    /// Creates an unassigned fellow.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty after trimming.
    pub fn fellow(id: PersonId, name: impl AsRef<str>, accommodation: Accommodation) -> Result<Self> {
        Ok(Self {
            id,
            name: validate_name(name.as_ref())?,
            office: None,
            placement: Placement::Fellow {
                accommodation,
                living_space: None,
            },
        })
    }

    /// Sets stored room assignments, as read back from persistence.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a living space is given for staff.
    pub fn with_assignments(
        mut self,
        office: Option<String>,
        living_space: Option<String>,
    ) -> Result<Self> {
        self.office = office;
        match (&mut self.placement, living_space) {
            (Placement::Fellow { living_space: slot, .. }, assigned) => *slot = assigned,
            (Placement::Staff, None) => {}
            (Placement::Staff, Some(room)) => {
                return Err(Error::Validation {
                    field: "living_space".into(),
                    message: format!("staff member {} cannot hold living space '{room}'", self.id),
                })
            }
        }
        Ok(self)
    }

    /// Returns the person's id.
    #[must_use]
    pub const fn id(&self) -> &PersonId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self.placement {
            Placement::Staff => Role::Staff,
            Placement::Fellow { .. } => Role::Fellow,
        }
    }

    /// Returns the fellow's accommodation request, or `None` for staff.
    #[must_use]
    pub const fn accommodation(&self) -> Option<Accommodation> {
        match self.placement {
            Placement::Staff => None,
            Placement::Fellow { accommodation, .. } => Some(accommodation),
        }
    }

    /// Returns `true` for a fellow who requested a living space.
    #[must_use]
    pub const fn wants_living_space(&self) -> bool {
        matches!(self.accommodation(), Some(Accommodation::Requested))
    }

    /// Returns the name of the assigned office.
    #[must_use]
    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }

    /// Returns the name of the assigned living space (always `None` for staff).
    #[must_use]
    pub fn living_space(&self) -> Option<&str> {
        match &self.placement {
            Placement::Staff => None,
            Placement::Fellow { living_space, .. } => living_space.as_deref(),
        }
    }

    /// Returns the room of `kind` currently held.
    #[must_use]
    pub fn room_of_kind(&self, kind: RoomKind) -> Option<&str> {
        match kind {
            RoomKind::Office => self.office(),
            RoomKind::LivingSpace => self.living_space(),
        }
    }

    /// Returns `true` if the person holds every room `rule` requires.
    #[must_use]
    pub fn is_fully_allocated(&self, rule: FellowAllocationRule) -> bool {
        match &self.placement {
            Placement::Staff => self.office.is_some(),
            Placement::Fellow {
                accommodation,
                living_space,
            } => {
                let needs_living_space = match rule {
                    FellowAllocationRule::Strict => true,
                    FellowAllocationRule::Accommodation => {
                        *accommodation == Accommodation::Requested
                    }
                };
                self.office.is_some() && (!needs_living_space || living_space.is_some())
            }
        }
    }

    /// Points the slot for `kind` at `room`.
    pub(crate) fn assign(&mut self, kind: RoomKind, room: &str) -> Result<()> {
        match (kind, &mut self.placement) {
            (RoomKind::Office, _) => {
                self.office = Some(room.to_string());
                Ok(())
            }
            (RoomKind::LivingSpace, Placement::Fellow { living_space, .. }) => {
                *living_space = Some(room.to_string());
                Ok(())
            }
            (RoomKind::LivingSpace, Placement::Staff) => Err(Error::InvalidRelocation {
                details: format!("staff member {} cannot occupy a living space", self.id),
            }),
        }
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "name".into(),
            message: "name must be non-empty".into(),
        });
    }
    Ok(trimmed.to_string())
}
