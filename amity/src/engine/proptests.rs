//! Property-based tests for the allocation engine.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::Amity;
use crate::person::{Accommodation, Role};
use crate::room::RoomKind;

#[derive(Debug, Clone)]
enum Op {
    CreateRoom(RoomKind),
    AddPerson(Role, Accommodation),
    Relocate { person: usize, room: usize },
    Reallocate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::sample::select(RoomKind::ALL.to_vec()).prop_map(Op::CreateRoom),
        (
            prop::sample::select(Role::ALL.to_vec()),
            prop::bool::ANY.prop_map(|wants| if wants {
                Accommodation::Requested
            } else {
                Accommodation::NotRequested
            }),
        )
            .prop_map(|(role, acc)| Op::AddPerson(role, acc)),
        (0usize..64, 0usize..32).prop_map(|(person, room)| Op::Relocate { person, room }),
        (0usize..64).prop_map(Op::Reallocate),
    ]
}

fn apply(amity: &mut Amity<StdRng>, op: &Op, rooms_made: &mut usize) {
    match op {
        Op::CreateRoom(kind) => {
            *rooms_made += 1;
            amity.create_room(&format!("R{rooms_made}"), *kind).unwrap();
        }
        Op::AddPerson(role, acc) => {
            amity.add_person("Someone", *role, Some(*acc)).unwrap();
        }
        Op::Relocate { person, room } => {
            let id = amity.people(None).nth(*person).map(|p| p.id().clone());
            let name = amity.rooms(None).nth(*room).map(|r| r.name().to_string());
            if let (Some(id), Some(name)) = (id, name) {
                let before = amity.snapshot();
                if amity.relocate_person(&id, &name).is_err() {
                    assert_eq!(amity.snapshot(), before, "failed relocation mutated state");
                }
            }
        }
        Op::Reallocate(person) => {
            let id = amity.people(None).nth(*person).map(|p| p.id().clone());
            if let Some(id) = id {
                amity.allocate_person(&id).unwrap();
            }
        }
    }
}

fn assert_consistent(amity: &Amity<StdRng>) {
    let mut placements = HashSet::new();
    for room in amity.rooms(None) {
        assert!(room.occupants().len() <= room.capacity());
        for id in room.occupants() {
            let person = amity.person(id).expect("occupant exists");
            assert_eq!(person.room_of_kind(room.kind()), Some(room.name()));
            assert!(person.role().may_occupy(room.kind()));
            assert!(placements.insert((id.clone(), room.kind())));
        }
    }
    for person in amity.people(None) {
        for kind in RoomKind::ALL {
            if let Some(name) = person.room_of_kind(kind) {
                assert!(amity.room(name).expect("room exists").contains(person.id()));
            }
        }
    }

    let available: HashSet<_> = RoomKind::ALL
        .iter()
        .flat_map(|&kind| amity.available_rooms(kind))
        .map(|room| room.name().to_string())
        .collect();
    let open: HashSet<_> = amity
        .rooms(None)
        .filter(|room| !room.is_full())
        .map(|room| room.name().to_string())
        .collect();
    assert_eq!(available, open);

    let unallocated = amity.unallocated();
    for person in amity.people(None) {
        let listed = unallocated
            .staff
            .iter()
            .chain(&unallocated.fellows)
            .any(|p| p.id() == person.id());
        assert_eq!(listed, !person.is_fully_allocated(amity.rule()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: if cfg!(feature = "property-tests") { 2000 } else { 128 },
        .. ProptestConfig::default()
    })]

    // Registries stay cross-consistent whatever sequence of operations runs
    #[test]
    fn registries_stay_consistent(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..80)
    ) {
        let mut amity = Amity::with_rng(StdRng::seed_from_u64(seed));
        let mut rooms_made = 0;
        for op in &ops {
            apply(&mut amity, op, &mut rooms_made);
            assert_consistent(&amity);
        }
    }

    // Ids are unique and numbered densely per role
    #[test]
    fn ids_are_sequential_per_role(roles in prop::collection::vec(prop::sample::select(Role::ALL.to_vec()), 0..40)) {
        let mut amity = Amity::with_rng(StdRng::seed_from_u64(0));
        for role in &roles {
            amity.add_person("Someone", *role, None).unwrap();
        }
        for role in Role::ALL {
            let ids: Vec<_> = amity.people(Some(role)).map(|p| p.id().to_string()).collect();
            let expected: Vec<_> = (1..=ids.len())
                .map(|n| format!("{}{n:03}", role.id_prefix()))
                .collect();
            prop_assert_eq!(ids, expected);
        }
    }

    // A snapshot restores to an identical state
    #[test]
    fn snapshot_restore_is_identity(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..40)
    ) {
        let mut amity = Amity::with_rng(StdRng::seed_from_u64(seed));
        let mut rooms_made = 0;
        for op in &ops {
            apply(&mut amity, op, &mut rooms_made);
        }
        let snapshot = amity.snapshot();
        let restored = Amity::restore(snapshot.clone(), amity.rule(), StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(restored.snapshot(), snapshot);
    }
}
