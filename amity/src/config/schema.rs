//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_EXPORT_FILE;
use crate::error::{Error, Result};
use crate::person::FellowAllocationRule;

/// Default lock wait when nothing is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files and overrides can be
/// layered; the accessor methods fill in defaults.
///
/// # Examples
///
/// ```
/// use amity::config::Config;
///
/// let config: Config = serde_yaml::from_str("fellow_rule: accommodation\n").unwrap();
/// assert!(config.fellow_rule.is_some());
/// assert!(serde_yaml::from_str::<Config>("fellow_rules: strict\n").is_err());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// When a fellow counts as fully allocated.
    pub fellow_rule: Option<FellowAllocationRule>,

    /// Maximum time to wait for the state store lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for report commands.
    pub output_format: Option<OutputFormat>,

    /// Default file name for `save-state` exports.
    pub state_file: Option<String>,
}

impl Config {
    /// The configured fellow rule, or the strict default.
    #[must_use]
    pub fn fellow_rule(&self) -> FellowAllocationRule {
        self.fellow_rule.unwrap_or_default()
    }

    /// The configured lock wait as a duration.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// The configured report format, or a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The configured export file name, or `amity.sqlite`.
    #[must_use]
    pub fn state_file(&self) -> &str {
        self.state_file.as_deref().unwrap_or(DEFAULT_EXPORT_FILE)
    }
}

/// Output format for reports.
///
/// # Examples
///
/// ```
/// use amity::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable grouped listing.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("expected table, json or csv, got '{s}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fellow_rule(), FellowAllocationRule::Strict);
        assert_eq!(config.lock_wait(), Duration::from_secs(5));
        assert_eq!(config.output_format(), OutputFormat::Table);
        assert_eq!(config.state_file(), "amity.sqlite");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "\
fellow_rule: strict
maximum_lock_wait_seconds: 30
output_format: csv
state_file: office.sqlite
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.lock_wait(), Duration::from_secs(30));
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.state_file(), "office.sqlite");
    }

    #[test]
    fn test_unknown_rule_rejected() {
        assert!(serde_yaml::from_str::<Config>("fellow_rule: lenient\n").is_err());
    }
}
