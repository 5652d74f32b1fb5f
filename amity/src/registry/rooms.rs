//! The room registry: offices, living spaces and their availability.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::room::{Room, RoomKind};

/// Owns every office and living space.
///
/// Room names are unique across both kinds. The available subset (rooms
/// that are not full) is cached per kind as indices into the room lists and
/// rebuilt by [`RoomRegistry::recompute_availability`].
///
/// # Examples
///
/// ```
/// use amity::{RoomKind, RoomRegistry};
///
/// let mut rooms = RoomRegistry::new();
/// rooms.create("Blue", RoomKind::Office).unwrap();
/// rooms.create("Green", RoomKind::LivingSpace).unwrap();
///
/// assert!(rooms.create("Blue", RoomKind::LivingSpace).is_err());
/// assert_eq!(rooms.list(Some(RoomKind::Office)).count(), 1);
/// assert_eq!(rooms.available(RoomKind::LivingSpace).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    offices: Vec<Room>,
    living_spaces: Vec<Room>,
    available_offices: Vec<usize>,
    available_living_spaces: Vec<usize>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from stored rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if two rooms share a name, a room is filed under
    /// the wrong kind, or a room holds more occupants than its capacity.
    pub fn from_rooms(offices: Vec<Room>, living_spaces: Vec<Room>) -> Result<Self> {
        let mut registry = Self::new();
        for (expected, rooms) in [
            (RoomKind::Office, offices),
            (RoomKind::LivingSpace, living_spaces),
        ] {
            for room in rooms {
                if room.kind() != expected {
                    return Err(Error::TypeMismatch {
                        expected,
                        found: room.kind(),
                    });
                }
                if registry.find_by_name(room.name()).is_some() {
                    return Err(Error::DuplicateName {
                        name: room.name().to_string(),
                    });
                }
                if room.occupants().len() > room.capacity() {
                    return Err(Error::DatabaseCorruption {
                        details: format!(
                            "room '{}' holds {} occupants but its capacity is {}",
                            room.name(),
                            room.occupants().len(),
                            room.capacity()
                        ),
                    });
                }
                registry.collection_mut(expected).push(room);
            }
        }
        registry.recompute_availability();
        Ok(registry)
    }

    /// Creates an empty room of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if any room, of either kind, is
    /// already called `name`, or a validation error if `name` is empty.
    pub fn create(&mut self, name: &str, kind: RoomKind) -> Result<&Room> {
        let room = Room::new(name, kind)?;
        if self.find_by_name(room.name()).is_some() {
            return Err(Error::DuplicateName {
                name: room.name().to_string(),
            });
        }

        let rooms = self.collection_mut(kind);
        rooms.push(room);
        let index = rooms.len() - 1;
        self.recompute_availability();
        Ok(&self.collection(kind)[index])
    }

    /// Looks up a room of either kind by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Room> {
        self.offices
            .iter()
            .chain(&self.living_spaces)
            .find(|room| room.name() == name)
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.offices
            .iter_mut()
            .chain(&mut self.living_spaces)
            .find(|room| room.name() == name)
    }

    /// Lists rooms in creation order, offices before living spaces,
    /// optionally restricted to one kind.
    pub fn list(&self, kind: Option<RoomKind>) -> impl Iterator<Item = &Room> + '_ {
        let offices = matches!(kind, None | Some(RoomKind::Office));
        let living_spaces = matches!(kind, None | Some(RoomKind::LivingSpace));
        self.offices
            .iter()
            .filter(move |_| offices)
            .chain(self.living_spaces.iter().filter(move |_| living_spaces))
    }

    /// Number of rooms, optionally of one kind.
    #[must_use]
    pub fn len(&self, kind: Option<RoomKind>) -> usize {
        match kind {
            Some(kind) => self.collection(kind).len(),
            None => self.offices.len() + self.living_spaces.len(),
        }
    }

    /// Returns `true` if no rooms exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offices.is_empty() && self.living_spaces.is_empty()
    }

    /// Rebuilds the available subsets from the current occupancy.
    pub fn recompute_availability(&mut self) {
        self.available_offices = open_indices(&self.offices);
        self.available_living_spaces = open_indices(&self.living_spaces);
    }

    /// Iterates the cached available rooms of `kind`.
    pub fn available(&self, kind: RoomKind) -> impl Iterator<Item = &Room> + '_ {
        let rooms = self.collection(kind);
        self.available_indices(kind).iter().map(move |&index| &rooms[index])
    }

    /// Picks one available room of `kind` uniformly at random.
    ///
    /// Every room with spare capacity is equally likely, however full it is.
    /// Returns `None` when no room of that kind has space.
    pub fn pick_available<R: Rng + ?Sized>(&self, kind: RoomKind, rng: &mut R) -> Option<&Room> {
        self.available_indices(kind)
            .choose(rng)
            .map(|&index| &self.collection(kind)[index])
    }

    fn collection(&self, kind: RoomKind) -> &Vec<Room> {
        match kind {
            RoomKind::Office => &self.offices,
            RoomKind::LivingSpace => &self.living_spaces,
        }
    }

    fn collection_mut(&mut self, kind: RoomKind) -> &mut Vec<Room> {
        match kind {
            RoomKind::Office => &mut self.offices,
            RoomKind::LivingSpace => &mut self.living_spaces,
        }
    }

    fn available_indices(&self, kind: RoomKind) -> &[usize] {
        match kind {
            RoomKind::Office => &self.available_offices,
            RoomKind::LivingSpace => &self.available_living_spaces,
        }
    }
}

fn open_indices(rooms: &[Room]) -> Vec<usize> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| !room.is_full())
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::PersonId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn fill(registry: &mut RoomRegistry, name: &str) {
        let room = registry.find_by_name_mut(name).unwrap();
        let mut n = 0;
        while !room.is_full() {
            n += 1;
            room.admit(format!("FL{n:03}").parse::<PersonId>().unwrap());
        }
        registry.recompute_availability();
    }

    #[test]
    fn test_duplicate_name_across_kinds() {
        let mut rooms = RoomRegistry::new();
        rooms.create("Blue", RoomKind::Office).unwrap();

        let err = rooms.create("Blue", RoomKind::LivingSpace).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { ref name } if name == "Blue"));
        assert_eq!(rooms.len(None), 1);
    }

    #[test]
    fn test_list_filters_by_kind() {
        let mut rooms = RoomRegistry::new();
        rooms.create("Green", RoomKind::LivingSpace).unwrap();
        rooms.create("Blue", RoomKind::Office).unwrap();
        rooms.create("Red", RoomKind::Office).unwrap();

        let all: Vec<_> = rooms.list(None).map(Room::name).collect();
        assert_eq!(all, vec!["Blue", "Red", "Green"]);

        let living: Vec<_> = rooms.list(Some(RoomKind::LivingSpace)).map(Room::name).collect();
        assert_eq!(living, vec!["Green"]);
    }

    #[test]
    fn test_full_rooms_leave_available_set() {
        let mut rooms = RoomRegistry::new();
        rooms.create("Blue", RoomKind::Office).unwrap();
        rooms.create("Red", RoomKind::Office).unwrap();
        fill(&mut rooms, "Blue");

        let available: Vec<_> = rooms.available(RoomKind::Office).map(Room::name).collect();
        assert_eq!(available, vec!["Red"]);
    }

    #[test]
    fn test_pick_available_none_when_all_full() {
        let mut rooms = RoomRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(rooms.pick_available(RoomKind::Office, &mut rng).is_none());

        rooms.create("Green", RoomKind::LivingSpace).unwrap();
        fill(&mut rooms, "Green");
        assert!(rooms.pick_available(RoomKind::LivingSpace, &mut rng).is_none());
    }

    #[test]
    fn test_pick_available_never_returns_full_room() {
        let mut rooms = RoomRegistry::new();
        for name in ["A", "B", "C", "D"] {
            rooms.create(name, RoomKind::Office).unwrap();
        }
        fill(&mut rooms, "A");
        fill(&mut rooms, "C");

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let room = rooms.pick_available(RoomKind::Office, &mut rng).unwrap();
            assert!(!room.is_full());
            seen.insert(room.name().to_string());
        }
        assert_eq!(seen, HashSet::from(["B".to_string(), "D".to_string()]));
    }

    #[test]
    fn test_pick_available_ignores_occupancy() {
        let mut rooms = RoomRegistry::new();
        rooms.create("Crowded", RoomKind::Office).unwrap();
        rooms.create("Empty", RoomKind::Office).unwrap();
        let crowded = rooms.find_by_name_mut("Crowded").unwrap();
        for n in 1..=5 {
            crowded.admit(format!("ST{n:03}").parse::<PersonId>().unwrap());
        }
        rooms.recompute_availability();

        let mut rng = StdRng::seed_from_u64(7);
        let trials = 2000;
        let crowded_picks = (0..trials)
            .filter(|_| rooms.pick_available(RoomKind::Office, &mut rng).unwrap().name() == "Crowded")
            .count();
        assert!(
            (900..=1100).contains(&crowded_picks),
            "crowded room picked {crowded_picks} of {trials} times"
        );
    }

    #[test]
    fn test_from_rooms_rejects_overfull_room() {
        let room = Room::new("Green", RoomKind::LivingSpace).unwrap();
        let mut value = serde_json::to_value(&room).unwrap();
        value["occupants"] = serde_json::json!(["FL001", "FL002", "FL003", "FL004", "FL005"]);
        let overfull: Room = serde_json::from_value(value).unwrap();

        let err = RoomRegistry::from_rooms(Vec::new(), vec![overfull]).unwrap_err();
        assert!(matches!(err, Error::DatabaseCorruption { ref details } if details.contains("capacity")));
    }

    #[test]
    fn test_from_rooms_rejects_duplicates() {
        let offices = vec![Room::new("Blue", RoomKind::Office).unwrap()];
        let living = vec![Room::new("Blue", RoomKind::LivingSpace).unwrap()];
        assert!(RoomRegistry::from_rooms(offices, living).is_err());
    }

    #[test]
    fn test_from_rooms_rejects_misfiled_kind() {
        let offices = vec![Room::new("Green", RoomKind::LivingSpace).unwrap()];
        let result = RoomRegistry::from_rooms(offices, Vec::new());
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }
}
