//! Create room command implementation.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use amity::RoomKind;
use clap::Args;

/// Create one or more rooms of a kind.
#[derive(Args)]
pub struct CreateRoomCommand {
    /// Room kind: office or living
    #[arg(value_name = "KIND")]
    pub kind: RoomKind,

    /// Names of the rooms to create
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,
}

impl CreateRoomCommand {
    /// Execute the create-room command.
    ///
    /// Either every room is created or, on a duplicate, none is saved.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;

        for name in &self.names {
            session.amity_mut().create_room(name, self.kind)?;
        }
        session.commit()?;

        if !global.quiet {
            println!("Created {} rooms: {}", self.kind, self.names.join(", "));
        }
        Ok(())
    }
}
