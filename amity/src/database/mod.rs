//! SQLite persistence for allocation state.
//!
//! A store holds one [`StateSnapshot`](crate::StateSnapshot): both room
//! collections with their occupants, both people collections with their
//! assignments, and the id counters. The CLI keeps its working state in one
//! store and exports or imports others with [`save_state`] and
//! [`load_state`].
//!
//! # Examples
//!
//! ```no_run
//! use amity::database::{load_state, save_state};
//! use amity::{Amity, Role, RoomKind};
//!
//! let mut amity = Amity::new();
//! amity.create_room("Blue", RoomKind::Office).unwrap();
//! amity.add_person("John Roe", Role::Staff, None).unwrap();
//!
//! save_state("/tmp/amity.sqlite", &amity.snapshot()).unwrap();
//! let snapshot = load_state("/tmp/amity.sqlite").unwrap().unwrap();
//! assert_eq!(snapshot.staff.len(), 1);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, DEFAULT_EXPORT_FILE, STATE_FILE,
};
pub use connection::Database;
pub use operations::{load_state, load_state_with, save_state, save_state_with};

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
