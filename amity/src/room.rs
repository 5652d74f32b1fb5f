//! Room types: offices and living spaces.
//!
//! A [`Room`] is a named, capacity-limited list of occupants. The capacity is
//! fixed by its [`RoomKind`]: six for an office, four for a living space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::PersonId;

/// The kind of a room, which fixes its capacity and who may occupy it.
///
/// # Examples
///
/// ```
/// use amity::RoomKind;
///
/// assert_eq!(RoomKind::Office.capacity(), 6);
/// assert_eq!(RoomKind::LivingSpace.capacity(), 4);
/// assert_eq!("living".parse::<RoomKind>().unwrap(), RoomKind::LivingSpace);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// Working space for staff and fellows.
    Office,
    /// Accommodation, for fellows only.
    LivingSpace,
}

impl RoomKind {
    /// Both kinds, offices first.
    pub const ALL: [Self; 2] = [Self::Office, Self::LivingSpace];

    /// Maximum number of occupants for rooms of this kind.
    #[must_use]
    pub const fn capacity(self) -> usize {
        match self {
            Self::Office => 6,
            Self::LivingSpace => 4,
        }
    }

    /// Stable identifier used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::LivingSpace => "living_space",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Office => write!(f, "office"),
            Self::LivingSpace => write!(f, "living space"),
        }
    }
}

impl FromStr for RoomKind {
    type Err = Error;

    /// Parses `office` or `living` / `living_space` / `living-space`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "office" => Ok(Self::Office),
            "living" | "living_space" | "living-space" | "livingspace" => Ok(Self::LivingSpace),
            _ => Err(Error::Validation {
                field: "room_kind".into(),
                message: format!("unknown room kind '{s}' (expected office or living)"),
            }),
        }
    }
}

/// A room and its current occupants.
///
/// Occupants are held by id, in the order they moved in. The occupant list
/// can only be changed from inside the crate, which keeps it within capacity.
///
/// # Examples
///
/// ```
/// use amity::{Room, RoomKind};
///
/// let room = Room::new("Blue", RoomKind::Office).unwrap();
/// assert_eq!(room.name(), "Blue");
/// assert_eq!(room.spare_capacity(), 6);
/// assert!(!room.is_full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    name: String,
    kind: RoomKind,
    occupants: Vec<PersonId>,
}

impl Room {
    /// Creates an empty room.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty after trimming.
    pub fn new(name: impl AsRef<str>, kind: RoomKind) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "room_name".into(),
                message: "room name must be non-empty".into(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            occupants: Vec::new(),
        })
    }

    /// Rebuilds a room with a known occupant list, as read from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the occupants exceed the
    /// capacity of `kind`.
    pub fn with_occupants(
        name: impl AsRef<str>,
        kind: RoomKind,
        occupants: Vec<PersonId>,
    ) -> Result<Self> {
        let mut room = Self::new(name, kind)?;
        if occupants.len() > kind.capacity() {
            return Err(Error::DatabaseCorruption {
                details: format!(
                    "room '{}' holds {} occupants but its capacity is {}",
                    room.name,
                    occupants.len(),
                    kind.capacity()
                ),
            });
        }
        room.occupants = occupants;
        Ok(room)
    }

    /// Returns the room name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the room kind.
    #[must_use]
    pub const fn kind(&self) -> RoomKind {
        self.kind
    }

    /// Returns the maximum number of occupants.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    /// Returns the occupants in move-in order.
    #[must_use]
    pub fn occupants(&self) -> &[PersonId] {
        &self.occupants
    }

    /// Returns `true` when no more occupants fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity()
    }

    /// Returns how many more occupants fit.
    #[must_use]
    pub fn spare_capacity(&self) -> usize {
        self.capacity().saturating_sub(self.occupants.len())
    }

    /// Returns `true` if the person currently occupies this room.
    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.occupants.contains(id)
    }

    /// Adds an occupant. Callers check [`Room::is_full`] first.
    pub(crate) fn admit(&mut self, id: PersonId) {
        debug_assert!(!self.is_full(), "admitting into full room {}", self.name);
        self.occupants.push(id);
    }

    /// Removes an occupant, returning whether they were present.
    pub(crate) fn evict(&mut self, id: &PersonId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|occupant| occupant != id);
        self.occupants.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> PersonId {
        raw.parse().unwrap()
    }

    #[test]
    fn test_capacity_by_kind() {
        assert_eq!(Room::new("A", RoomKind::Office).unwrap().capacity(), 6);
        assert_eq!(Room::new("B", RoomKind::LivingSpace).unwrap().capacity(), 4);
    }

    #[test]
    fn test_room_name_trimmed() {
        let room = Room::new("  Blue ", RoomKind::Office).unwrap();
        assert_eq!(room.name(), "Blue");
    }

    #[test]
    fn test_empty_room_name_rejected() {
        assert!(Room::new("", RoomKind::Office).is_err());
        assert!(Room::new("   ", RoomKind::LivingSpace).is_err());
    }

    #[test]
    fn test_room_fills_at_capacity() {
        let mut room = Room::new("Green", RoomKind::LivingSpace).unwrap();
        for n in 1..=4 {
            assert!(!room.is_full());
            room.admit(id(&format!("FL00{n}")));
        }
        assert!(room.is_full());
        assert_eq!(room.spare_capacity(), 0);
    }

    #[test]
    fn test_evict_preserves_order() {
        let mut room = Room::new("Blue", RoomKind::Office).unwrap();
        room.admit(id("ST001"));
        room.admit(id("FL001"));
        room.admit(id("ST002"));

        assert!(room.evict(&id("FL001")));
        assert!(!room.evict(&id("FL001")));
        assert_eq!(room.occupants(), &[id("ST001"), id("ST002")]);
    }

    #[test]
    fn test_with_occupants_over_capacity() {
        let occupants = (1..=5).map(|n| id(&format!("FL00{n}"))).collect();
        let result = Room::with_occupants("Green", RoomKind::LivingSpace, occupants);
        assert!(matches!(result, Err(Error::DatabaseCorruption { .. })));
    }

    #[test]
    fn test_room_kind_parse() {
        assert_eq!("OFFICE".parse::<RoomKind>().unwrap(), RoomKind::Office);
        assert_eq!("Living".parse::<RoomKind>().unwrap(), RoomKind::LivingSpace);
        assert_eq!(
            "living_space".parse::<RoomKind>().unwrap(),
            RoomKind::LivingSpace
        );
        assert!("kitchen".parse::<RoomKind>().is_err());
    }

    #[test]
    fn test_room_kind_display() {
        assert_eq!(RoomKind::Office.to_string(), "office");
        assert_eq!(RoomKind::LivingSpace.to_string(), "living space");
        assert_eq!(RoomKind::LivingSpace.as_str(), "living_space");
    }
}
