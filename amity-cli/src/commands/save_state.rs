//! Save state command implementation.
//!
//! Exports the working state to a standalone SQLite file. Any file already
//! at the destination is replaced.

use crate::error::CliError;
use crate::utils::{
    busy_timeout, resolve_data_dir, resolve_in_data_dir, same_file_path, shorten_path,
    GlobalOptions, Session,
};
use amity::database::STATE_FILE;
use amity::DatabaseConfig;
use clap::Args;
use std::path::PathBuf;

/// Export the current state to an SQLite file.
#[derive(Args)]
pub struct SaveStateCommand {
    /// Destination file; a bare file name is placed in the data directory.
    /// Defaults to the configured state file (amity.sqlite)
    #[arg(long, value_name = "FILE")]
    pub db: Option<PathBuf>,
}

impl SaveStateCommand {
    /// Execute the save-state command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let target = self
            .db
            .unwrap_or_else(|| PathBuf::from(session.config().state_file()));
        let path = resolve_in_data_dir(global, &target)?;
        if same_file_path(&path, &resolve_data_dir(global)?.join(STATE_FILE)) {
            return Err(CliError::InvalidArguments(format!(
                "{} is the working state; choose another file",
                path.display()
            )));
        }

        let db_config =
            DatabaseConfig::new(&path).with_busy_timeout(busy_timeout(global, session.config()));
        amity::database::save_state_with(db_config, &session.amity().snapshot())?;

        if !global.quiet {
            println!("State saved to {}", shorten_path(&path));
        }
        Ok(())
    }
}
