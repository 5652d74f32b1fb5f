//! Moving a person between rooms of the same kind.

use rand::Rng;
use serde::Serialize;

use super::{person_not_found, room_not_found, Amity};
use crate::error::{Error, Result};
use crate::id::PersonId;
use crate::room::RoomKind;

/// The outcome of a successful relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    /// Who moved.
    pub person_id: PersonId,
    /// Kind of both rooms involved.
    pub kind: RoomKind,
    /// The room they left.
    pub from: String,
    /// The room they moved into.
    pub to: String,
}

impl<R: Rng> Amity<R> {
    /// Moves a person out of their current room of the destination's kind
    /// and into the destination.
    ///
    /// Every check runs before anything changes, in this order: the person
    /// exists, the room exists, the room has space, the person's role may
    /// occupy it, the person currently holds a different room of that kind.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] for an unknown person or room
    /// * [`Error::RoomFull`] if the destination has no spare capacity
    /// * [`Error::InvalidRelocation`] when moving staff into a living space
    /// * [`Error::NotAllocated`] if the person holds no room of that kind,
    ///   or already holds the destination
    /// * [`Error::TypeMismatch`] if the held room is of another kind
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::{Amity, Role, RoomKind};
    ///
    /// let mut amity = Amity::new();
    /// amity.create_room("Blue", RoomKind::Office).unwrap();
    /// let id = amity.add_person("John Roe", Role::Staff, None).unwrap().id().clone();
    /// amity.create_room("Red", RoomKind::Office).unwrap();
    ///
    /// let moved = amity.relocate_person(&id, "Red").unwrap();
    /// assert_eq!(moved.from, "Blue");
    /// assert_eq!(amity.person(&id).unwrap().office(), Some("Red"));
    /// ```
    pub fn relocate_person(&mut self, id: &PersonId, room_name: &str) -> Result<Relocation> {
        let person = self.people.find_by_id(id).ok_or_else(|| person_not_found(id))?;
        let destination = self
            .rooms
            .find_by_name(room_name)
            .ok_or_else(|| room_not_found(room_name))?;

        if destination.is_full() {
            return Err(Error::RoomFull {
                room: destination.name().to_string(),
                capacity: destination.capacity(),
            });
        }

        let kind = destination.kind();
        if !person.role().may_occupy(kind) {
            return Err(Error::InvalidRelocation {
                details: format!("{} {id} cannot be moved into a {kind}", person.role()),
            });
        }

        let not_allocated = || Error::NotAllocated {
            person_id: id.to_string(),
            kind,
        };
        let current = person
            .room_of_kind(kind)
            .filter(|&held| held != destination.name())
            .and_then(|held| self.rooms.find_by_name(held))
            .ok_or_else(not_allocated)?;
        if current.kind() != kind {
            return Err(Error::TypeMismatch {
                expected: kind,
                found: current.kind(),
            });
        }

        let relocation = Relocation {
            person_id: id.clone(),
            kind,
            from: current.name().to_string(),
            to: destination.name().to_string(),
        };

        self.people
            .find_by_id_mut(id)
            .ok_or_else(|| person_not_found(id))?
            .assign(kind, &relocation.to)?;
        if let Some(room) = self.rooms.find_by_name_mut(&relocation.from) {
            room.evict(id);
        }
        if let Some(room) = self.rooms.find_by_name_mut(&relocation.to) {
            room.admit(id.clone());
        }
        self.refresh();

        log::info!(
            "relocated {id} from {kind} '{}' to '{}'",
            relocation.from,
            relocation.to
        );
        Ok(relocation)
    }
}
