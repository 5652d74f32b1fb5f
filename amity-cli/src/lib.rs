//! Library exports for amity-cli.
//!
//! This module exports the CLI structure so tests and tooling can inspect
//! the command definitions without running the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
