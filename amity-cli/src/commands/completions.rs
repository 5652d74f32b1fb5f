//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary (the package is `amity-cli`).
const BIN_NAME: &str = "amity";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

/// Tell the user where the script goes, on stderr so stdout stays pipeable.
fn print_install_hint(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    match shell {
        Shell::Bash => {
            eprintln!("#   amity completions bash > ~/.local/share/bash-completion/completions/amity");
            eprintln!("# Or add to ~/.bashrc:");
            eprintln!("#   eval \"$(amity completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   amity completions zsh > ~/.zsh/completions/_amity");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   amity completions fish > ~/.config/fish/completions/amity.fish");
        }
        Shell::PowerShell => {
            eprintln!("#   amity completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }
    eprintln!();
}
