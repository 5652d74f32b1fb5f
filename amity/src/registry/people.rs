//! The person registry: staff, fellows and their allocation status.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::id::{IdGenerator, PersonId};
use crate::person::{Accommodation, FellowAllocationRule, Person, Role};

/// People who do not yet hold every room their role requires.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Unallocated<'a> {
    /// Staff without an office.
    pub staff: Vec<&'a Person>,
    /// Fellows missing an office or a living space.
    pub fellows: Vec<&'a Person>,
}

impl Unallocated<'_> {
    /// Returns `true` if everyone is fully allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty() && self.fellows.is_empty()
    }
}

/// Owns every staff member and fellow, and issues their ids.
///
/// The fully-allocated subsets are a cache over the people collections,
/// rebuilt by [`PersonRegistry::mark_allocation_status`].
///
/// # Examples
///
/// ```
/// use amity::{Accommodation, FellowAllocationRule, PersonRegistry};
///
/// let mut people = PersonRegistry::new();
/// let staff = people.create_staff("John Roe").unwrap().id().clone();
/// people.create_fellow("Jane Doe", Accommodation::Requested).unwrap();
///
/// people.mark_allocation_status(FellowAllocationRule::Strict);
/// let unallocated = people.unallocated();
/// assert_eq!(unallocated.staff[0].id(), &staff);
/// assert_eq!(unallocated.fellows.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PersonRegistry {
    ids: IdGenerator,
    staff: Vec<Person>,
    fellows: Vec<Person>,
    allocated_staff: Vec<PersonId>,
    allocated_fellows: Vec<PersonId>,
}

impl PersonRegistry {
    /// Creates an empty registry with fresh id counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from stored people and counters.
    ///
    /// # Errors
    ///
    /// Returns an error if an id appears twice, a person is filed under the
    /// wrong role, an id lacks its role's prefix, or a counter is behind an
    /// id already issued.
    pub fn from_people(ids: IdGenerator, staff: Vec<Person>, fellows: Vec<Person>) -> Result<Self> {
        let mut registry = Self {
            ids,
            ..Self::default()
        };

        for (expected, people) in [(Role::Staff, staff), (Role::Fellow, fellows)] {
            for person in people {
                if person.role() != expected {
                    return Err(Error::DatabaseCorruption {
                        details: format!("{} is filed as {expected}", person.id()),
                    });
                }
                if registry.find_by_id(person.id()).is_some() {
                    return Err(Error::DatabaseCorruption {
                        details: format!("person id {} appears more than once", person.id()),
                    });
                }
                let Some(sequence) = issued_sequence(person.id(), expected) else {
                    return Err(Error::DatabaseCorruption {
                        details: format!(
                            "{} is not a {expected} id (expected prefix {})",
                            person.id(),
                            expected.id_prefix()
                        ),
                    });
                };
                if sequence > ids.last_issued(expected) {
                    return Err(Error::DatabaseCorruption {
                        details: format!(
                            "{} is ahead of the {expected} id counter ({})",
                            person.id(),
                            ids.last_issued(expected)
                        ),
                    });
                }
                registry.collection_mut(expected).push(person);
            }
        }

        Ok(registry)
    }

    /// Creates a staff member with a fresh `ST` id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn create_staff(&mut self, name: &str) -> Result<&Person> {
        let mut ids = self.ids;
        let person = Person::staff(ids.next(Role::Staff), name)?;
        self.ids = ids;
        self.staff.push(person);
        Ok(&self.staff[self.staff.len() - 1])
    }

    /// Creates a fellow with a fresh `FL` id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn create_fellow(&mut self, name: &str, accommodation: Accommodation) -> Result<&Person> {
        let mut ids = self.ids;
        let person = Person::fellow(ids.next(Role::Fellow), name, accommodation)?;
        self.ids = ids;
        self.fellows.push(person);
        Ok(&self.fellows[self.fellows.len() - 1])
    }

    /// Looks up a person by exact id, scanning staff then fellows.
    #[must_use]
    pub fn find_by_id(&self, id: &PersonId) -> Option<&Person> {
        self.staff
            .iter()
            .chain(&self.fellows)
            .find(|person| person.id() == id)
    }

    pub(crate) fn find_by_id_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.staff
            .iter_mut()
            .chain(&mut self.fellows)
            .find(|person| person.id() == id)
    }

    /// Returns everyone whose name contains `text` (case-sensitive),
    /// staff first, each in creation order.
    #[must_use]
    pub fn find_by_name_substring(&self, text: &str) -> Vec<&Person> {
        self.list(None)
            .filter(|person| person.name().contains(text))
            .collect()
    }

    /// Lists people in creation order, staff before fellows, optionally
    /// restricted to one role.
    pub fn list(&self, role: Option<Role>) -> impl Iterator<Item = &Person> + '_ {
        let staff = matches!(role, None | Some(Role::Staff));
        let fellows = matches!(role, None | Some(Role::Fellow));
        self.staff
            .iter()
            .filter(move |_| staff)
            .chain(self.fellows.iter().filter(move |_| fellows))
    }

    /// Number of people, optionally of one role.
    #[must_use]
    pub fn len(&self, role: Option<Role>) -> usize {
        match role {
            Some(Role::Staff) => self.staff.len(),
            Some(Role::Fellow) => self.fellows.len(),
            None => self.staff.len() + self.fellows.len(),
        }
    }

    /// Returns `true` if nobody has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty() && self.fellows.is_empty()
    }

    /// The id counters, as persisted.
    #[must_use]
    pub const fn id_counters(&self) -> IdGenerator {
        self.ids
    }

    /// Rebuilds the fully-allocated subsets under `rule`.
    pub fn mark_allocation_status(&mut self, rule: FellowAllocationRule) {
        self.allocated_staff = fully_allocated(&self.staff, rule);
        self.allocated_fellows = fully_allocated(&self.fellows, rule);
    }

    /// Everyone outside the fully-allocated subsets, split by role.
    #[must_use]
    pub fn unallocated(&self) -> Unallocated<'_> {
        Unallocated {
            staff: self
                .staff
                .iter()
                .filter(|person| !self.allocated_staff.contains(person.id()))
                .collect(),
            fellows: self
                .fellows
                .iter()
                .filter(|person| !self.allocated_fellows.contains(person.id()))
                .collect(),
        }
    }

    fn collection_mut(&mut self, role: Role) -> &mut Vec<Person> {
        match role {
            Role::Staff => &mut self.staff,
            Role::Fellow => &mut self.fellows,
        }
    }
}

fn fully_allocated(people: &[Person], rule: FellowAllocationRule) -> Vec<PersonId> {
    people
        .iter()
        .filter(|person| person.is_fully_allocated(rule))
        .map(|person| person.id().clone())
        .collect()
}

/// Numeric part of an id issued for `role`, if it has the generated shape.
fn issued_sequence(id: &PersonId, role: Role) -> Option<u32> {
    id.as_str()
        .strip_prefix(role.id_prefix())
        .and_then(|digits| digits.parse().ok())
}
