//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddPersonCommand, CompletionsCommand, CreateRoomCommand, FindPersonCommand,
    InteractiveCommand, LoadPeopleCommand, LoadStateCommand, PrintAllocationsCommand,
    PrintRoomCommand, PrintUnallocatedCommand, ReallocatePersonCommand, SaveStateCommand,
    ShowDataDirCommand,
};
use crate::error::CliError;
use crate::utils::GlobalOptions;
use amity::FellowAllocationRule;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Allocate offices and living spaces to staff and fellows.
#[derive(Parser)]
#[command(name = "amity")]
#[command(version, about = "Allocate offices and living spaces", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "AMITY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u32>,

    /// When a fellow counts as fully allocated (strict or accommodation)
    #[arg(long, value_name = "RULE", global = true, env = "AMITY_FELLOW_RULE")]
    pub fellow_rule: Option<FellowAllocationRule>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Split the global options off for the commands.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            fellow_rule: self.fellow_rule,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create one or more rooms of a kind
    #[command(alias = "create_room")]
    CreateRoom(CreateRoomCommand),

    /// Add a person and allocate them rooms
    #[command(alias = "add_person")]
    AddPerson(AddPersonCommand),

    /// Move a person into another room of the same kind
    #[command(alias = "reallocate_person")]
    ReallocatePerson(ReallocatePersonCommand),

    /// Add everyone listed in a people file
    #[command(alias = "load_people")]
    LoadPeople(LoadPeopleCommand),

    /// Print every room with its occupants
    #[command(alias = "print_allocations")]
    PrintAllocations(PrintAllocationsCommand),

    /// Print people still waiting for a room
    #[command(alias = "print_unallocated")]
    PrintUnallocated(PrintUnallocatedCommand),

    /// Print one room's occupants
    #[command(alias = "print_room")]
    PrintRoom(PrintRoomCommand),

    /// Find people by part of their name
    #[command(alias = "find_person")]
    FindPerson(FindPersonCommand),

    /// Export the current state to an SQLite file
    #[command(alias = "save_state")]
    SaveState(SaveStateCommand),

    /// Replace the current state with an exported SQLite file
    #[command(alias = "load_state")]
    LoadState(LoadStateCommand),

    /// Show the resolved data directory path
    #[command(alias = "show_data_dir")]
    ShowDataDir(ShowDataDirCommand),

    /// Start an interactive session
    #[command(short_flag = 'i', long_flag = "interactive")]
    Interactive(InteractiveCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

impl Command {
    /// Run the command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Command::CreateRoom(cmd) => cmd.execute(global),
            Command::AddPerson(cmd) => cmd.execute(global),
            Command::ReallocatePerson(cmd) => cmd.execute(global),
            Command::LoadPeople(cmd) => cmd.execute(global),
            Command::PrintAllocations(cmd) => cmd.execute(global),
            Command::PrintUnallocated(cmd) => cmd.execute(global),
            Command::PrintRoom(cmd) => cmd.execute(global),
            Command::FindPerson(cmd) => cmd.execute(global),
            Command::SaveState(cmd) => cmd.execute(global),
            Command::LoadState(cmd) => cmd.execute(global),
            Command::ShowDataDir(cmd) => cmd.execute(global),
            Command::Interactive(cmd) => cmd.execute(global),
            Command::Completions(cmd) => cmd.execute(global),
        }
    }
}

/// One line typed at the interactive prompt.
#[derive(Parser)]
#[command(name = "amity", no_binary_name = true, disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
        ReplLine::command().debug_assert();
    }

    #[test]
    fn test_snake_case_aliases() {
        let cli = Cli::try_parse_from(["amity", "create_room", "office", "Blue"]).unwrap();
        assert!(matches!(cli.command, Command::CreateRoom(_)));
        let cli = Cli::try_parse_from(["amity", "print_unallocated"]).unwrap();
        assert!(matches!(cli.command, Command::PrintUnallocated(_)));
    }

    #[test]
    fn test_short_interactive_flag() {
        let cli = Cli::try_parse_from(["amity", "-i"]).unwrap();
        assert!(matches!(cli.command, Command::Interactive(_)));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "amity",
            "show-data-dir",
            "--data-dir",
            "/tmp/amity",
            "--fellow-rule",
            "accommodation",
            "--busy-timeout",
            "3",
        ])
        .unwrap();
        let global = cli.global_options();
        assert_eq!(global.data_dir, Some(PathBuf::from("/tmp/amity")));
        assert_eq!(global.fellow_rule, Some(FellowAllocationRule::Accommodation));
        assert_eq!(global.busy_timeout, Some(3));
    }

    #[test]
    fn test_repl_line_parses_without_binary_name() {
        let line = ReplLine::try_parse_from(["add-person", "Jane", "Doe", "fellow", "y"]).unwrap();
        assert!(matches!(line.command, Command::AddPerson(_)));
    }
}
