//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run.
const AMITY_VARS: [&str; 6] = [
    "AMITY_DATA_DIR",
    "AMITY_FELLOW_RULE",
    "AMITY_MAXIMUM_LOCK_WAIT_SECONDS",
    "AMITY_OUTPUT_FORMAT",
    "AMITY_STATE_FILE",
    "AMITY_LOG_MODE",
];

/// A people file with two fellows wanting rooms, one without, and staff.
pub const PEOPLE: &str = "\
OLUWAFEMI SULE FELLOW Y
DOMINIC WALTERS STAFF
SIMON PATTERSON FELLOW Y
MARI LAWRENCE FELLOW N
LEIGH RILEY STAFF
";

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the amity data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; amity creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("amity-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder with no `--data-dir`.
    ///
    /// Host `AMITY_*` variables are cleared so tests see defaults.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("amity").expect("Failed to find amity binary");
        for var in AMITY_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run a command that must succeed and return its stdout.
    ///
    /// # Panics
    /// Panics if the command exits non-zero.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run amity");

        assert!(
            output.status.success(),
            "amity {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Create rooms of one kind.
    pub fn create_rooms(&self, kind: &str, names: &[&str]) {
        let mut args = vec!["create-room", kind];
        args.extend_from_slice(names);
        self.run(&args);
    }

    /// Run `print-allocations --format json` and parse the result.
    pub fn allocations_json(&self) -> serde_json::Value {
        let stdout = self.run(&["print-allocations", "--format", "json"]);
        serde_json::from_str(&stdout).expect("print-allocations emitted invalid JSON")
    }

    /// Run `print-unallocated --format json` and parse the result.
    pub fn unallocated_json(&self) -> serde_json::Value {
        let stdout = self.run(&["print-unallocated", "--format", "json"]);
        serde_json::from_str(&stdout).expect("print-unallocated emitted invalid JSON")
    }

    /// Occupant ids of `room` according to `print-allocations`.
    pub fn occupants_of(&self, room: &str) -> Vec<String> {
        let rooms = self.allocations_json();
        rooms
            .as_array()
            .expect("rooms array")
            .iter()
            .find(|r| r["name"] == room)
            .map(|r| {
                r["occupants"]
                    .as_array()
                    .expect("occupants array")
                    .iter()
                    .map(|o| o["id"].as_str().expect("id").to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
