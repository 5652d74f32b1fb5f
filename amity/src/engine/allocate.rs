//! Random allocation of people into rooms with spare capacity.

use rand::Rng;

use super::{person_not_found, room_not_found, Amity};
use crate::batch::PersonRecord;
use crate::error::Result;
use crate::id::PersonId;
use crate::person::Person;
use crate::room::RoomKind;

impl<R: Rng> Amity<R> {
    /// Fills any missing room slots for a person.
    ///
    /// An unassigned office is filled from a uniformly random available
    /// office. A fellow who wants accommodation and has no living space gets
    /// a uniformly random available living space. Slots already filled are
    /// never changed, so calling this again is a no-op for a fully placed
    /// person. When no room of a kind has space, that slot stays empty and
    /// the person shows up as unallocated; this is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no person has `id`.
    pub fn allocate_person(&mut self, id: &PersonId) -> Result<&Person> {
        let person = self.people.find_by_id(id).ok_or_else(|| person_not_found(id))?;
        let needs_office = person.office().is_none();
        let needs_living_space = person.wants_living_space() && person.living_space().is_none();

        if needs_office {
            self.place(id, RoomKind::Office)?;
        }
        if needs_living_space {
            self.place(id, RoomKind::LivingSpace)?;
        }

        self.refresh();
        self.people.find_by_id(id).ok_or_else(|| person_not_found(id))
    }

    /// Creates and allocates everyone in a batch, in order.
    ///
    /// The whole batch is read before anything is created, so a malformed
    /// record anywhere leaves the registries untouched.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by `records`, or a validation error
    /// from creating a person.
    pub fn load_people<I>(&mut self, records: I) -> Result<Vec<PersonId>>
    where
        I: IntoIterator<Item = Result<PersonRecord>>,
    {
        let records = records.into_iter().collect::<Result<Vec<_>>>()?;
        log::debug!("loading {} people", records.len());

        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let person = self.add_person(
                &record.full_name(),
                record.role,
                Some(record.accommodation),
            )?;
            created.push(person.id().clone());
        }
        Ok(created)
    }

    /// Assigns `id` a random available room of `kind`, if there is one.
    fn place(&mut self, id: &PersonId, kind: RoomKind) -> Result<()> {
        let Some(name) = self
            .rooms
            .pick_available(kind, &mut self.rng)
            .map(|room| room.name().to_string())
        else {
            log::warn!("no {kind} with space for {id}");
            return Ok(());
        };

        let room = self
            .rooms
            .find_by_name_mut(&name)
            .ok_or_else(|| room_not_found(&name))?;
        let person = self
            .people
            .find_by_id_mut(id)
            .ok_or_else(|| person_not_found(id))?;
        person.assign(kind, room.name())?;
        room.admit(id.clone());

        // Keep the available set honest between the two picks.
        self.rooms.recompute_availability();
        log::debug!("allocated {id} to {kind} '{name}'");
        Ok(())
    }
}
