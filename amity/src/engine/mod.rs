//! The allocation engine.
//!
//! [`Amity`] is the single context that owns both registries. Every
//! operation takes it by reference, so independent contexts (one per test,
//! for instance) never share state.
//!
//! # Examples
//!
//! ```
//! use amity::{Accommodation, Amity, Role, RoomKind};
//!
//! let mut amity = Amity::new();
//! amity.create_room("Blue", RoomKind::Office).unwrap();
//! amity.create_room("Green", RoomKind::LivingSpace).unwrap();
//!
//! let jane = amity
//!     .add_person("Jane Doe", Role::Fellow, Some(Accommodation::Requested))
//!     .unwrap();
//! assert_eq!(jane.id().as_str(), "FL001");
//! assert_eq!(jane.office(), Some("Blue"));
//! assert_eq!(jane.living_space(), Some("Green"));
//! ```

mod allocate;
mod relocate;

#[cfg(test)]
mod proptests;

pub use relocate::Relocation;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::id::PersonId;
use crate::person::{Accommodation, FellowAllocationRule, Person, Role};
use crate::registry::{PersonRegistry, RoomRegistry, Unallocated};
use crate::room::{Room, RoomKind};
use crate::snapshot::StateSnapshot;

/// The allocation context: all rooms, all people, and the random source
/// used to pick rooms.
///
/// # Type Parameters
///
/// * `R` - The random number generator (defaults to an entropy-seeded `StdRng`)
#[derive(Debug, Clone)]
pub struct Amity<R = StdRng> {
    rooms: RoomRegistry,
    people: PersonRegistry,
    rule: FellowAllocationRule,
    rng: R,
}

impl Amity<StdRng> {
    /// Creates an empty context seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Amity<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Amity<R> {
    /// Creates an empty context drawing room picks from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::Amity;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let amity = Amity::with_rng(StdRng::seed_from_u64(7));
    /// assert!(amity.rooms(None).next().is_none());
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            people: PersonRegistry::new(),
            rule: FellowAllocationRule::default(),
            rng,
        }
    }

    /// Rebuilds a context from a snapshot.
    ///
    /// The snapshot is checked against the registry invariants before
    /// anything is built: unique room names and ids, occupancy within
    /// capacity, no staff in living spaces, and room occupant lists that
    /// agree with each person's assignments. Derived caches are recomputed;
    /// no room is re-assigned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the snapshot violates any of
    /// those invariants.
    pub fn restore(snapshot: StateSnapshot, rule: FellowAllocationRule, rng: R) -> Result<Self> {
        let rooms = RoomRegistry::from_rooms(snapshot.offices, snapshot.living_spaces)
            .map_err(|e| match e {
                Error::DatabaseCorruption { .. } => e,
                other => Error::DatabaseCorruption {
                    details: other.to_string(),
                },
            })?;
        let people = PersonRegistry::from_people(snapshot.ids, snapshot.staff, snapshot.fellows)?;
        check_cross_references(&rooms, &people)?;

        let mut amity = Self {
            rooms,
            people,
            rule,
            rng,
        };
        amity.refresh();
        log::debug!(
            "restored {} rooms and {} people",
            amity.rooms.len(None),
            amity.people.len(None)
        );
        Ok(amity)
    }

    /// Sets the rule deciding when a fellow is fully allocated.
    #[must_use]
    pub fn with_rule(mut self, rule: FellowAllocationRule) -> Self {
        self.rule = rule;
        self.refresh();
        self
    }

    /// Returns the active fellow allocation rule.
    #[must_use]
    pub const fn rule(&self) -> FellowAllocationRule {
        self.rule
    }

    /// Creates an empty room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if the name is taken by any room.
    pub fn create_room(&mut self, name: &str, kind: RoomKind) -> Result<&Room> {
        let room = self.rooms.create(name, kind)?;
        log::info!("created {kind} '{}'", room.name());
        Ok(room)
    }

    /// Creates a person and immediately allocates them.
    ///
    /// Staff ignore `accommodation`; fellows default to not requesting one.
    /// Running out of rooms is not an error: the person is returned with
    /// whatever could be assigned.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn add_person(
        &mut self,
        name: &str,
        role: Role,
        accommodation: Option<Accommodation>,
    ) -> Result<&Person> {
        let id = match role {
            Role::Staff => self.people.create_staff(name)?.id().clone(),
            Role::Fellow => self
                .people
                .create_fellow(name, accommodation.unwrap_or_default())?
                .id()
                .clone(),
        };
        log::info!("created {role} {id}");
        self.allocate_person(&id)
    }

    /// Looks up a room by exact name.
    #[must_use]
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.find_by_name(name)
    }

    /// Lists rooms, offices first, optionally of one kind.
    pub fn rooms(&self, kind: Option<RoomKind>) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.list(kind)
    }

    /// Lists rooms of `kind` that still have space.
    pub fn available_rooms(&self, kind: RoomKind) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.available(kind)
    }

    /// Resolves a room's occupant ids to people, in move-in order.
    pub fn occupants<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Person> + 'a {
        room.occupants()
            .iter()
            .filter_map(|id| self.people.find_by_id(id))
    }

    /// Every room paired with its resolved occupants, offices first.
    pub fn allocations(&self) -> impl Iterator<Item = (&Room, Vec<&Person>)> + '_ {
        self.rooms
            .list(None)
            .map(move |room| (room, self.occupants(room).collect()))
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.find_by_id(id)
    }

    /// Lists people, staff first, optionally of one role.
    pub fn people(&self, role: Option<Role>) -> impl Iterator<Item = &Person> + '_ {
        self.people.list(role)
    }

    /// Finds people whose name contains `text` (case-sensitive).
    #[must_use]
    pub fn find_people(&self, text: &str) -> Vec<&Person> {
        self.people.find_by_name_substring(text)
    }

    /// People not yet holding every room their role requires.
    #[must_use]
    pub fn unallocated(&self) -> Unallocated<'_> {
        self.people.unallocated()
    }

    /// Captures the full state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            ids: self.people.id_counters(),
            offices: self.rooms.list(Some(RoomKind::Office)).cloned().collect(),
            living_spaces: self
                .rooms
                .list(Some(RoomKind::LivingSpace))
                .cloned()
                .collect(),
            staff: self.people.list(Some(Role::Staff)).cloned().collect(),
            fellows: self.people.list(Some(Role::Fellow)).cloned().collect(),
        }
    }

    /// Recomputes person allocation status, then room availability.
    fn refresh(&mut self) {
        self.people.mark_allocation_status(self.rule);
        self.rooms.recompute_availability();
    }
}

fn person_not_found(id: &PersonId) -> Error {
    Error::NotFound {
        resource: format!("person with id {id}"),
    }
}

fn room_not_found(name: &str) -> Error {
    Error::NotFound {
        resource: format!("room named '{name}'"),
    }
}

fn check_cross_references(rooms: &RoomRegistry, people: &PersonRegistry) -> Result<()> {
    let corruption = |details: String| Error::DatabaseCorruption { details };

    for person in people.list(None) {
        for kind in RoomKind::ALL {
            let Some(name) = person.room_of_kind(kind) else {
                continue;
            };
            let room = rooms.find_by_name(name).ok_or_else(|| {
                corruption(format!("{} is assigned to unknown room '{name}'", person.id()))
            })?;
            if room.kind() != kind {
                return Err(corruption(format!(
                    "{} holds '{name}' as a {kind} but it is a {}",
                    person.id(),
                    room.kind()
                )));
            }
            if !room.contains(person.id()) {
                return Err(corruption(format!(
                    "{} is assigned to '{name}' but not among its occupants",
                    person.id()
                )));
            }
        }
    }

    for room in rooms.list(None) {
        let mut seen = HashSet::new();
        for occupant in room.occupants() {
            if !seen.insert(occupant) {
                return Err(corruption(format!(
                    "{occupant} is listed twice in '{}'",
                    room.name()
                )));
            }
            let person = people.find_by_id(occupant).ok_or_else(|| {
                corruption(format!("'{}' lists unknown occupant {occupant}", room.name()))
            })?;
            if person.room_of_kind(room.kind()) != Some(room.name()) {
                return Err(corruption(format!(
                    "'{}' lists {occupant} who is not assigned to it",
                    room.name()
                )));
            }
        }
    }

    Ok(())
}
