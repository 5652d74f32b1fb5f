//! Main entry point for the amity CLI.
//!
//! This is the command-line interface for the amity room allocation system.
//! Every subcommand loads the working state from the data directory, runs,
//! and saves it back if anything changed. `amity -i` starts an interactive
//! session that accepts the same subcommands.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Usage errors exit with the invalid-arguments code; help and version
    // still exit cleanly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(4);
        }
        Err(e) => e.exit(),
    };

    // Route library logging through the level-gated stderr logger
    let _ = amity::init_logger(cli.verbose, cli.quiet).install();

    let global = cli.global_options();

    match cli.command.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
