//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `create_room`: Create offices or living spaces
//! - `add_person`: Add a staff member or fellow and allocate them
//! - `reallocate_person`: Move a person to another room of the same kind
//! - `load_people`: Add everyone listed in a people file
//! - `print_allocations`: Show every room with its occupants
//! - `print_unallocated`: Show people still waiting for a room
//! - `print_room`: Show one room's occupants
//! - `find_person`: Look people up by name
//! - `save_state`: Export the working state to an SQLite file
//! - `load_state`: Replace the working state from an SQLite file
//! - `show_data_dir`: Show resolved data directory path
//! - `interactive`: Read commands from a prompt
//! - `completions`: Generate shell completion scripts

pub mod add_person;
pub mod completions;
pub mod create_room;
pub mod find_person;
pub mod interactive;
pub mod load_people;
pub mod load_state;
pub mod print_allocations;
pub mod print_room;
pub mod print_unallocated;
pub mod reallocate_person;
pub mod save_state;
pub mod show_data_dir;

pub use add_person::AddPersonCommand;
pub use completions::CompletionsCommand;
pub use create_room::CreateRoomCommand;
pub use find_person::FindPersonCommand;
pub use interactive::InteractiveCommand;
pub use load_people::LoadPeopleCommand;
pub use load_state::LoadStateCommand;
pub use print_allocations::PrintAllocationsCommand;
pub use print_room::PrintRoomCommand;
pub use print_unallocated::PrintUnallocatedCommand;
pub use reallocate_person::ReallocatePersonCommand;
pub use save_state::SaveStateCommand;
pub use show_data_dir::ShowDataDirCommand;
