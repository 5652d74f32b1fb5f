//! Load people command implementation.
//!
//! Reads a people file (`FIRST LAST ROLE [Y|N]` per line) and adds and
//! allocates everyone in it. A malformed line aborts the whole load before
//! anyone is created.

use crate::error::CliError;
use crate::utils::{GlobalOptions, Session};
use amity::BatchFile;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Add everyone listed in a people file.
#[derive(Args)]
pub struct LoadPeopleCommand {
    /// Path to the people file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl LoadPeopleCommand {
    /// Execute the load-people command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let batch = BatchFile::open(&self.file)?;
        let mut session = Session::open(global)?;

        let ids = session.amity_mut().load_people(batch.records()?)?;
        let rows: Vec<[String; 5]> = ids
            .iter()
            .filter_map(|id| session.amity().person(id))
            .map(|person| {
                [
                    person.id().to_string(),
                    person.name().to_string(),
                    person.role().to_string(),
                    person.office().unwrap_or("-").to_string(),
                    person.living_space().unwrap_or("-").to_string(),
                ]
            })
            .collect();
        session.commit()?;

        if global.quiet {
            return Ok(());
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "Loaded {} people", rows.len())?;
        writeln!(handle, "ID\tNAME\tROLE\tOFFICE\tLIVING SPACE")?;
        for row in &rows {
            writeln!(handle, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}
