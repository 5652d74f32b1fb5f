//! Print room command implementation.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use std::io::Write;

/// Print one room's occupants.
#[derive(Args)]
pub struct PrintRoomCommand {
    /// Name of the room
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl PrintRoomCommand {
    /// Execute the print-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let amity = session.amity();
        let room = amity.room(&self.name).ok_or_else(|| amity::Error::NotFound {
            resource: format!("room named '{}'", self.name),
        })?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(
            handle,
            "Room: {} ({}, {}/{})",
            room.name().to_uppercase(),
            room.kind(),
            room.occupants().len(),
            room.capacity()
        )?;
        writeln!(handle, "ID\tNAME\tROLE")?;
        for person in amity.occupants(room) {
            writeln!(handle, "{}\t{}\t{}", person.id(), person.name(), person.role())?;
        }
        Ok(())
    }
}
