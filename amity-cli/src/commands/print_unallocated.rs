//! Print unallocated command implementation.
//!
//! Lists the people who do not yet hold every room their role requires,
//! together with the kinds of room they are missing.

use crate::error::CliError;
use crate::utils::{open_output, GlobalOptions, Session};
use amity::config::OutputFormat;
use amity::{FellowAllocationRule, Person, Role, RoomKind, Unallocated};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Column headers for CSV output.
const COLUMN_HEADERS: [&str; 4] = ["person_id", "name", "role", "missing"];

/// Print people still waiting for a room.
#[derive(Args)]
pub struct PrintUnallocatedCommand {
    /// Output format (table, json or csv); defaults to the configured format
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct WaitingPerson<'a> {
    id: &'a str,
    name: &'a str,
    missing: Vec<&'static str>,
}

#[derive(Serialize)]
struct UnallocatedReport<'a> {
    staff: Vec<WaitingPerson<'a>>,
    fellows: Vec<WaitingPerson<'a>>,
}

impl PrintUnallocatedCommand {
    /// Execute the print-unallocated command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let format = self
            .format
            .unwrap_or_else(|| session.config().output_format());
        let rule = session.amity().rule();
        let unallocated = session.amity().unallocated();

        let mut out = open_output(self.output.as_deref())?;
        match format {
            OutputFormat::Table => format_as_table(&unallocated, rule, &mut out)?,
            OutputFormat::Json => format_as_json(&unallocated, rule, &mut out)?,
            OutputFormat::Csv => format_as_csv(&unallocated, rule, &mut out)?,
        }
        out.flush()?;

        if let Some(path) = self.output {
            if !global.quiet {
                println!("Unallocated people written to {}", path.display());
            }
        }
        Ok(())
    }
}

/// Room kinds a person still lacks under `rule`.
fn missing(person: &Person, rule: FellowAllocationRule) -> Vec<&'static str> {
    let mut kinds = Vec::new();
    if person.office().is_none() {
        kinds.push(RoomKind::Office.as_str());
    }
    let needs_living_space = person.wants_living_space()
        || (person.role() == Role::Fellow && rule == FellowAllocationRule::Strict);
    if needs_living_space && person.living_space().is_none() {
        kinds.push(RoomKind::LivingSpace.as_str());
    }
    kinds
}

fn waiting<'a>(people: &[&'a Person], rule: FellowAllocationRule) -> Vec<WaitingPerson<'a>> {
    people
        .iter()
        .map(|person| WaitingPerson {
            id: person.id().as_str(),
            name: person.name(),
            missing: missing(person, rule),
        })
        .collect()
}

/// Format as two sections, staff then fellows.
fn format_as_table(
    unallocated: &Unallocated<'_>,
    rule: FellowAllocationRule,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let sections = [
        ("Staff", &unallocated.staff, "All staff allocated"),
        ("Fellows", &unallocated.fellows, "All fellows allocated"),
    ];
    let divider = "=".repeat(60);
    for (title, people, all_done) in sections {
        writeln!(out, "{title}")?;
        writeln!(out, "{divider}")?;
        if people.is_empty() {
            writeln!(out, "{all_done}")?;
        }
        for person in waiting(people, rule) {
            writeln!(
                out,
                "    {}\t{}\tmissing: {}",
                person.id,
                person.name,
                person.missing.join(", ")
            )?;
        }
        writeln!(out, "{divider}")?;
        writeln!(out)?;
    }
    Ok(())
}

/// Format as a JSON object with `staff` and `fellows` arrays.
fn format_as_json(
    unallocated: &Unallocated<'_>,
    rule: FellowAllocationRule,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let report = UnallocatedReport {
        staff: waiting(&unallocated.staff, rule),
        fellows: waiting(&unallocated.fellows, rule),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Format as CSV, one row per person; missing kinds are `;`-separated.
fn format_as_csv(
    unallocated: &Unallocated<'_>,
    rule: FellowAllocationRule,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new().from_writer(out);
    writer.write_record(COLUMN_HEADERS)?;

    let everyone = unallocated.staff.iter().chain(&unallocated.fellows);
    for person in everyone {
        let role = person.role().to_string();
        let gaps = missing(person, rule).join(";");
        writer.write_record([
            person.id().as_str(),
            person.name(),
            role.as_str(),
            gaps.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
