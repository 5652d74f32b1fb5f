//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for testing the amity
//! library.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use amity::{Amity, RoomKind};

/// Creates an empty context with a fixed seed so room picks are repeatable.
#[allow(dead_code)]
pub fn seeded(seed: u64) -> Amity<StdRng> {
    Amity::with_rng(StdRng::seed_from_u64(seed))
}

/// Creates a context with the given offices and living spaces.
///
/// # Panics
///
/// Panics if a room cannot be created (for example, a duplicate name).
#[allow(dead_code)]
pub fn campus(offices: &[&str], living_spaces: &[&str]) -> Amity<StdRng> {
    let mut amity = seeded(42);
    for name in offices {
        amity.create_room(name, RoomKind::Office).unwrap();
    }
    for name in living_spaces {
        amity.create_room(name, RoomKind::LivingSpace).unwrap();
    }
    amity
}

/// Writes a people file into `dir` and returns its path.
#[allow(dead_code)]
pub fn write_people_file(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("people.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Total number of room places taken, across every room.
#[allow(dead_code)]
pub fn occupied_places<R: rand::Rng>(amity: &Amity<R>) -> usize {
    amity.rooms(None).map(|room| room.occupants().len()).sum()
}
