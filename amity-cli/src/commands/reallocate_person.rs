//! Reallocate person command implementation.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use amity::PersonId;
use clap::Args;

/// Move a person into another room of the same kind.
#[derive(Args)]
pub struct ReallocatePersonCommand {
    /// Id of the person to move, e.g. FL001
    #[arg(value_name = "PERSON_ID")]
    pub person_id: PersonId,

    /// Name of the destination room
    #[arg(value_name = "ROOM")]
    pub room: String,
}

impl ReallocatePersonCommand {
    /// Execute the reallocate-person command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;

        let moved = session
            .amity_mut()
            .relocate_person(&self.person_id, &self.room)?;
        session.commit()?;

        if !global.quiet {
            println!(
                "{} relocated from {} to {}",
                moved.person_id, moved.from, moved.to
            );
        }
        Ok(())
    }
}
