//! Print allocations command implementation.
//!
//! This module implements the `print-allocations` command, which displays
//! every room and its occupants in various formats (table, JSON, CSV).

use crate::error::CliError;
use crate::utils::{open_output, GlobalOptions, Session};
use amity::config::OutputFormat;
use amity::{Amity, Person};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 5] = ["room", "kind", "person_id", "name", "role"];

/// Print every room with its occupants.
#[derive(Args)]
pub struct PrintAllocationsCommand {
    /// Output format (table, json or csv); defaults to the configured format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// A room as it appears in JSON output.
#[derive(Serialize)]
struct RoomReport<'a> {
    name: &'a str,
    kind: &'a str,
    capacity: usize,
    occupants: Vec<OccupantReport<'a>>,
}

/// One occupant as it appears in JSON output.
#[derive(Serialize)]
struct OccupantReport<'a> {
    id: &'a str,
    name: &'a str,
    role: String,
}

impl PrintAllocationsCommand {
    /// Execute the print-allocations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let format = self
            .format
            .unwrap_or_else(|| session.config().output_format());
        let amity = session.amity();

        let mut out = open_output(self.output.as_deref())?;
        match format {
            OutputFormat::Table => format_as_table(amity, &mut out)?,
            OutputFormat::Json => format_as_json(amity, &mut out)?,
            OutputFormat::Csv => format_as_csv(amity, &mut out)?,
        }
        out.flush()?;

        if let Some(path) = self.output {
            if !global.quiet {
                println!("Allocations written to {}", path.display());
            }
        }
        Ok(())
    }
}

fn occupants<'a>(people: &[&'a Person]) -> Vec<OccupantReport<'a>> {
    people
        .iter()
        .map(|&person| OccupantReport {
            id: person.id().as_str(),
            name: person.name(),
            role: person.role().to_string(),
        })
        .collect()
}

/// Format rooms as a human-readable listing, one block per room.
fn format_as_table(amity: &Amity, out: &mut dyn Write) -> Result<(), CliError> {
    let mut any = false;
    for (room, people) in amity.allocations() {
        any = true;
        writeln!(
            out,
            "{} ({}, {}/{})",
            room.name().to_uppercase(),
            room.kind(),
            room.occupants().len(),
            room.capacity()
        )?;
        writeln!(out, "{}", "-".repeat(40))?;
        let occupants = occupants(&people);
        if occupants.is_empty() {
            writeln!(out, "    (empty)")?;
        }
        for occupant in occupants {
            writeln!(out, "    {}\t{}\t{}", occupant.id, occupant.name, occupant.role)?;
        }
        writeln!(out)?;
    }
    if !any {
        writeln!(out, "No rooms")?;
    }
    Ok(())
}

/// Format rooms as JSON.
fn format_as_json(amity: &Amity, out: &mut dyn Write) -> Result<(), CliError> {
    let rooms: Vec<RoomReport<'_>> = amity
        .allocations()
        .map(|(room, people)| RoomReport {
            name: room.name(),
            kind: room.kind().as_str(),
            capacity: room.capacity(),
            occupants: occupants(&people),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &rooms)?;
    writeln!(out)?;
    Ok(())
}

/// Format rooms as CSV, one row per occupant.
///
/// Empty rooms get a single row with blank person columns.
fn format_as_csv(amity: &Amity, out: &mut dyn Write) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    writer.write_record(COLUMN_HEADERS)?;

    for (room, people) in amity.allocations() {
        let occupants = occupants(&people);
        if occupants.is_empty() {
            writer.write_record([room.name(), room.kind().as_str(), "", "", ""])?;
        }
        for occupant in &occupants {
            writer.write_record([
                room.name(),
                room.kind().as_str(),
                occupant.id,
                occupant.name,
                occupant.role.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
