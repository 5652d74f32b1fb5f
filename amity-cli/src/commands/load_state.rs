//! Load state command implementation.
//!
//! Replaces the working state with the contents of an exported SQLite file.
//! The export is validated in full before the working state is touched.

use crate::error::CliError;
use crate::utils::{
    busy_timeout, format_timestamp, resolve_in_data_dir, shorten_path, GlobalOptions, Session,
};
use amity::{Amity, Database, DatabaseConfig};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Replace the current state with an exported SQLite file.
#[derive(Args)]
pub struct LoadStateCommand {
    /// File to load; a bare file name is looked up in the data directory
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl LoadStateCommand {
    /// Execute the load-state command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let path = resolve_in_data_dir(global, &self.file)?;

        let db_config =
            DatabaseConfig::new(&path).with_busy_timeout(busy_timeout(global, session.config()));
        let snapshot = amity::database::load_state_with(db_config.clone())?.ok_or_else(|| {
            CliError::SemanticFailure(format!("No saved state in {}", path.display()))
        })?;
        let saved_at = Database::open(db_config.existing_only())?.saved_at()?;

        let rule = session.amity().rule();
        let loaded = Amity::restore(snapshot, rule, StdRng::from_entropy())?;
        let rooms = loaded.rooms(None).count();
        let people = loaded.people(None).count();
        session.replace(loaded);
        session.commit()?;

        if !global.quiet {
            println!(
                "Loaded {rooms} rooms and {people} people from {}",
                shorten_path(&path)
            );
            if let Some(ts) = saved_at {
                println!("Saved at {}", format_timestamp(ts));
            }
        }
        Ok(())
    }
}
