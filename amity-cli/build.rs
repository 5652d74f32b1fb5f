//! Build script for amity-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("amity")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Allocate offices and living spaces")
        .long_about(
            "Command-line tool for allocating offices and living spaces to staff and fellows",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("AMITY_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .arg(
            Arg::new("fellow-rule")
                .long("fellow-rule")
                .help("When a fellow counts as fully allocated (strict or accommodation)")
                .value_name("RULE")
                .global(true)
                .env("AMITY_FELLOW_RULE"),
        )
        .subcommands(vec![
            Command::new("create-room")
                .about("Create one or more rooms of a kind")
                .long_about("Create offices (capacity 6) or living spaces (capacity 4)"),
            Command::new("add-person")
                .about("Add a person and allocate them rooms")
                .long_about("Add a staff member or fellow and allocate a random available room"),
            Command::new("reallocate-person")
                .about("Move a person into another room of the same kind"),
            Command::new("load-people")
                .about("Add everyone listed in a people file")
                .long_about("Read FIRST LAST ROLE [Y|N] lines and add and allocate each person"),
            Command::new("print-allocations").about("Print every room with its occupants"),
            Command::new("print-unallocated").about("Print people still waiting for a room"),
            Command::new("print-room").about("Print one room's occupants"),
            Command::new("find-person").about("Find people by part of their name"),
            Command::new("save-state").about("Export the current state to an SQLite file"),
            Command::new("load-state")
                .about("Replace the current state with an exported SQLite file"),
            Command::new("show-data-dir").about("Show the resolved data directory path"),
            Command::new("interactive")
                .short_flag('i')
                .about("Start an interactive session"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var_os("OUT_DIR").ok_or_else(|| io::Error::other("OUT_DIR not set"))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("amity.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
