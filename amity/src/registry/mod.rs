//! Registries owning every room and person.
//!
//! Both registries keep a derived cache next to their collections: the
//! rooms that still have space, and the people who hold every room their
//! role requires. The caches are rebuilt from scratch after each mutation.

pub mod people;
pub mod rooms;

pub use people::{PersonRegistry, Unallocated};
pub use rooms::RoomRegistry;
