//! Integration tests for saving and loading allocation state.

mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use amity::database::{load_state, save_state, Database, DatabaseConfig};
use amity::{
    Accommodation, Amity, Error, FellowAllocationRule, PersonId, Role, RoomKind, StateSnapshot,
};

use common::campus;

fn populated() -> Amity<StdRng> {
    let mut amity = campus(&["Blue", "Red"], &["Green", "Yellow"]);
    amity.add_person("John Roe", Role::Staff, None).unwrap();
    amity
        .add_person("Jane Doe", Role::Fellow, Some(Accommodation::Requested))
        .unwrap();
    amity.add_person("Ada Obi", Role::Fellow, None).unwrap();
    amity
}

#[test]
fn test_save_then_load_reproduces_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("amity.sqlite");
    let amity = populated();

    save_state(&path, &amity.snapshot()).unwrap();
    let snapshot = load_state(&path).unwrap().unwrap();
    assert_eq!(snapshot, amity.snapshot());

    let restored = Amity::restore(
        snapshot,
        FellowAllocationRule::Strict,
        StdRng::seed_from_u64(9),
    )
    .unwrap();
    for room in amity.rooms(None) {
        let other = restored.room(room.name()).unwrap();
        assert_eq!(other.kind(), room.kind());
        assert_eq!(other.occupants(), room.occupants());
    }
    assert_eq!(
        restored.unallocated().fellows.len(),
        amity.unallocated().fellows.len()
    );
}

#[test]
fn test_ids_continue_after_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("amity.sqlite");
    save_state(&path, &populated().snapshot()).unwrap();

    let mut restored = Amity::restore(
        load_state(&path).unwrap().unwrap(),
        FellowAllocationRule::Strict,
        StdRng::seed_from_u64(9),
    )
    .unwrap();
    let staff = restored.add_person("Lee Kim", Role::Staff, None).unwrap();
    assert_eq!(staff.id().as_str(), "ST002");
    let fellow = restored.add_person("Sam Ng", Role::Fellow, None).unwrap();
    assert_eq!(fellow.id().as_str(), "FL003");
}

#[test]
fn test_load_missing_store() {
    let dir = tempdir().unwrap();
    let err = load_state(dir.path().join("nope.sqlite")).unwrap_err();
    assert!(matches!(err, Error::StoreNotFound { .. }));
}

#[test]
fn test_load_empty_store_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.sqlite");
    Database::open(DatabaseConfig::new(&path)).unwrap();

    assert!(load_state(&path).unwrap().is_none());
}

#[test]
fn test_load_saved_empty_state_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.sqlite");
    save_state(&path, &StateSnapshot::default()).unwrap();

    assert!(load_state(&path).unwrap().is_none());
}

#[test]
fn test_save_replaces_previous_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("amity.sqlite");
    save_state(&path, &populated().snapshot()).unwrap();

    let mut smaller = campus(&["Orange"], &[]);
    smaller.add_person("Solo", Role::Staff, None).unwrap();
    save_state(&path, &smaller.snapshot()).unwrap();

    let loaded = load_state(&path).unwrap().unwrap();
    assert_eq!(loaded, smaller.snapshot());
    assert!(loaded.rooms().all(|room| room.name() == "Orange"));
}

#[test]
fn test_newer_schema_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("future.sqlite");
    save_state(&path, &populated().snapshot()).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "UPDATE metadata SET value = '999' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();
    }

    let err = load_state(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedSchemaVersion { found: 999, .. }));
}

#[test]
fn test_tampered_occupancy_detected_on_restore() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tampered.sqlite");
    save_state(&path, &populated().snapshot()).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute("DELETE FROM occupancy WHERE person_id = 'ST001'", [])
            .unwrap();
    }

    let snapshot = load_state(&path).unwrap().unwrap();
    let result = Amity::restore(
        snapshot,
        FellowAllocationRule::Strict,
        StdRng::seed_from_u64(0),
    );
    assert!(matches!(result, Err(Error::DatabaseCorruption { .. })));
}

#[test]
fn test_overfull_room_detected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overfull.sqlite");
    save_state(&path, &populated().snapshot()).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        for n in 10..15 {
            conn.execute(
                "INSERT INTO occupancy (room_name, person_id, seat) VALUES ('Green', ?, ?)",
                rusqlite::params![format!("FL{n:03}"), n],
            )
            .unwrap();
        }
    }

    assert!(matches!(
        load_state(&path),
        Err(Error::DatabaseCorruption { .. })
    ));
}

#[test]
fn test_working_store_rewritten_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("amity.db");
    let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
    assert!(db.read_snapshot().unwrap().is_none());

    let mut amity = populated();
    db.write_snapshot(&amity.snapshot()).unwrap();
    amity.create_room("Purple", RoomKind::Office).unwrap();
    let moved: PersonId = "ST001".parse().unwrap();
    amity.relocate_person(&moved, "Purple").unwrap();
    db.write_snapshot(&amity.snapshot()).unwrap();

    let reread = Database::open(DatabaseConfig::new(&path)).unwrap();
    assert_eq!(reread.read_snapshot().unwrap(), Some(amity.snapshot()));
    assert!(reread.saved_at().unwrap().is_some());
}
