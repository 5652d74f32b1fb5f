#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # amity
//!
//! A library for allocating offices and living spaces to staff and fellows.
//!
//! Rooms come in two kinds with fixed capacities (offices seat 6, living
//! spaces sleep 4). People are staff, who only get an office, or fellows,
//! who get an office and, if they ask for one, a living space. New people
//! are placed in a uniformly random room with spare capacity; anyone who
//! cannot be placed is reported as unallocated.
//!
//! ## Core Types
//!
//! - [`Amity`]: the allocation engine that owns all rooms and people
//! - [`Room`] and [`RoomKind`]: rooms and their capacities
//! - [`Person`], [`PersonId`] and [`Role`]: people and their ids
//! - [`StateSnapshot`]: the persisted form of an [`Amity`] context
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use amity::{Accommodation, Amity, Error, Role, RoomKind};
//!
//! let mut amity = Amity::new();
//! amity.create_room("Blue", RoomKind::Office).unwrap();
//! amity.create_room("Green", RoomKind::LivingSpace).unwrap();
//!
//! let staff = amity.add_person("John Roe", Role::Staff, None).unwrap().id().clone();
//! assert_eq!(amity.person(&staff).unwrap().office(), Some("Blue"));
//!
//! // Staff never live on site
//! let err = amity.relocate_person(&staff, "Green").unwrap_err();
//! assert!(matches!(err, Error::InvalidRelocation { .. }));
//! ```

pub mod batch;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod id;
pub mod logging;
pub mod person;
pub mod registry;
pub mod room;
pub mod snapshot;

// Re-export key types at crate root for convenience
pub use batch::{BatchFile, PersonRecord};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use engine::{Amity, Relocation};
pub use error::{Error, Result};
pub use id::{IdGenerator, PersonId};
pub use logging::{init_logger, LogLevel, Logger};
pub use person::{Accommodation, FellowAllocationRule, Person, Role};
pub use registry::{PersonRegistry, RoomRegistry, Unallocated};
pub use room::{Room, RoomKind};
pub use snapshot::StateSnapshot;
