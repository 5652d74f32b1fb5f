//! Shared test utilities for database unit tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{Accommodation, Amity, Role, RoomKind, StateSnapshot};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// One office, one living space, one staff member and one fellow, all
/// placed: "Blue" holds ST001 and FL001, "Green" holds FL001.
///
/// # Panics
///
/// Panics if the fixture cannot be built.
#[must_use]
pub fn sample_snapshot() -> StateSnapshot {
    let mut amity = Amity::with_rng(StdRng::seed_from_u64(0));
    amity.create_room("Blue", RoomKind::Office).unwrap();
    amity.create_room("Green", RoomKind::LivingSpace).unwrap();
    amity.add_person("John Roe", Role::Staff, None).unwrap();
    amity
        .add_person("Jane Doe", Role::Fellow, Some(Accommodation::Requested))
        .unwrap();
    amity.snapshot()
}
