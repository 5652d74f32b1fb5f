//! Command to show the resolved data directory and the files kept in it.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_data_dir, GlobalOptions};
use amity::config::loader::CONFIG_FILE;
use amity::database::STATE_FILE;
use clap::Args;
use std::path::Path;

/// Show the resolved data directory path.
#[derive(Args)]
pub struct ShowDataDirCommand {
    /// Also list the working store, config file and export file
    #[arg(short, long)]
    pub files: bool,
}

impl ShowDataDirCommand {
    /// Execute the show-data-dir command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        println!("{}", data_dir.display());

        if self.files {
            let config = load_configuration(global)?;
            let files = [
                ("working state", data_dir.join(STATE_FILE)),
                ("config", data_dir.join(CONFIG_FILE)),
                ("export", data_dir.join(config.state_file())),
            ];
            for (label, path) in files {
                println!("  {label:<14}{} ({})", path.display(), presence(&path));
            }
        }
        Ok(())
    }
}

fn presence(path: &Path) -> &'static str {
    if path.exists() {
        "present"
    } else {
        "not created"
    }
}
