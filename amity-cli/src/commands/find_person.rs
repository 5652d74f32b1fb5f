//! Find person command implementation.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use clap::Args;
use std::io::Write;

/// Find people by part of their name.
#[derive(Args)]
pub struct FindPersonCommand {
    /// Text to look for in names (case-sensitive)
    #[arg(value_name = "TEXT")]
    pub text: String,
}

impl FindPersonCommand {
    /// Execute the find-person command.
    ///
    /// Exits with a semantic failure when nobody matches, so scripts can
    /// test for presence.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let matches = session.amity().find_people(&self.text);
        if matches.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "No person matches '{}'",
                self.text
            )));
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "ID\tNAME\tROLE\tOFFICE\tLIVING SPACE")?;
        for person in matches {
            writeln!(
                handle,
                "{}\t{}\t{}\t{}\t{}",
                person.id(),
                person.name(),
                person.role(),
                person.office().unwrap_or("-"),
                person.living_space().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}
