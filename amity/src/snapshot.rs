//! Serializable snapshot of the full allocation state.
//!
//! A [`StateSnapshot`] is what persistence saves and loads: both room
//! collections with their occupants, both people collections with their
//! assignments, and the id counters.

use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;
use crate::person::Person;
use crate::room::Room;

/// Everything needed to rebuild both registries exactly.
///
/// # Examples
///
/// ```
/// use amity::{Amity, RoomKind, Role};
///
/// let mut amity = Amity::new();
/// amity.create_room("Blue", RoomKind::Office).unwrap();
/// amity.add_person("John Roe", Role::Staff, None).unwrap();
///
/// let snapshot = amity.snapshot();
/// assert_eq!(snapshot.offices.len(), 1);
/// assert_eq!(snapshot.staff.len(), 1);
/// assert_eq!(snapshot.ids.last_issued(Role::Staff), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Id counters at the time of the snapshot.
    pub ids: IdGenerator,
    /// Offices in creation order.
    pub offices: Vec<Room>,
    /// Living spaces in creation order.
    pub living_spaces: Vec<Room>,
    /// Staff in creation order.
    pub staff: Vec<Person>,
    /// Fellows in creation order.
    pub fellows: Vec<Person>,
}

impl StateSnapshot {
    /// Returns `true` if the snapshot holds no rooms and no people.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offices.is_empty()
            && self.living_spaces.is_empty()
            && self.staff.is_empty()
            && self.fellows.is_empty()
    }

    /// Iterates all rooms, offices first.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.offices.iter().chain(&self.living_spaces)
    }

    /// Iterates all people, staff first.
    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.staff.iter().chain(&self.fellows)
    }
}
