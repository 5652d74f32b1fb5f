//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, the working
//! state session and output destinations.

use crate::error::CliError;
use amity::database::STATE_FILE;
use amity::{Amity, Config, ConfigBuilder, Database, DatabaseConfig, FellowAllocationRule};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Override the fellow allocation rule.
    pub fellow_rule: Option<FellowAllocationRule>,
}

/// Resolve the data directory path.
///
/// Priority: `--data-dir` (or `AMITY_DATA_DIR`) > `~/.amity`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.clone());
    }
    amity::database::default_data_dir().map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `<data-dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
///
/// Global options are applied on top by the callers that need them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The effective busy timeout: `--busy-timeout` wins over configuration.
pub fn busy_timeout(global: &GlobalOptions, config: &Config) -> Duration {
    global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()))
}

/// Resolve a user-supplied file path against the data directory.
///
/// Absolute paths and paths with a directory component are used as given;
/// a bare file name lands inside the data directory.
pub fn resolve_in_data_dir(global: &GlobalOptions, path: &Path) -> Result<PathBuf, CliError> {
    let has_dir = path
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    if path.is_absolute() || has_dir {
        Ok(path.to_path_buf())
    } else {
        Ok(resolve_data_dir(global)?.join(path))
    }
}

/// Returns `true` if `a` and `b` name the same file once `.`/`..`
/// components and symlinks in their directories are resolved.
///
/// The files themselves need not exist; their parent directories are
/// canonicalized when present.
pub fn same_file_path(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(path: &Path) -> PathBuf {
    if let Ok(full) = path.canonicalize() {
        return full;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map_or_else(|_| path.to_path_buf(), |dir| dir.join(name))
        }
        _ => path.to_path_buf(),
    }
}

/// The working state for one command.
///
/// Opening reads `<data-dir>/amity.db` (an empty engine if nothing was saved
/// yet). Changes only reach the store through [`Session::commit`], so a
/// command that fails part way leaves the store as it was.
pub struct Session {
    db: Database,
    amity: Amity,
    config: Config,
    dirty: bool,
}

impl Session {
    /// Load configuration and open the working store.
    pub fn open(global: &GlobalOptions) -> Result<Self, CliError> {
        let config = load_configuration(global)?;
        let data_dir = resolve_data_dir(global)?;
        fs::create_dir_all(&data_dir)?;

        let db_config = DatabaseConfig::new(data_dir.join(STATE_FILE))
            .with_busy_timeout(busy_timeout(global, &config));
        let db = Database::open(db_config)?;

        let rule = global.fellow_rule.unwrap_or_else(|| config.fellow_rule());
        let amity = match db.read_snapshot()? {
            Some(snapshot) => Amity::restore(snapshot, rule, StdRng::from_entropy())?,
            None => Amity::new().with_rule(rule),
        };

        Ok(Self {
            db,
            amity,
            config,
            dirty: false,
        })
    }

    /// Read access to the engine.
    pub fn amity(&self) -> &Amity {
        &self.amity
    }

    /// Write access to the engine; marks the session for saving.
    pub fn amity_mut(&mut self) -> &mut Amity {
        self.dirty = true;
        &mut self.amity
    }

    /// Replace the whole engine, as `load-state` does.
    pub fn replace(&mut self, amity: Amity) {
        self.dirty = true;
        self.amity = amity;
    }

    /// The merged configuration this session was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write the engine back to the working store if anything changed.
    pub fn commit(mut self) -> Result<(), CliError> {
        if self.dirty {
            self.db.write_snapshot(&self.amity.snapshot())?;
            log::debug!("saved working state");
        }
        Ok(())
    }
}

/// Open the destination for report output: a file if given, else stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
