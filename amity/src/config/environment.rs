//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `AMITY_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use amity::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads `AMITY_FELLOW_RULE`, `AMITY_MAXIMUM_LOCK_WAIT_SECONDS`,
    /// `AMITY_OUTPUT_FORMAT` and `AMITY_STATE_FILE`. Unset and empty
    /// variables leave the config alone.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if a value cannot be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(val) = Self::var("AMITY_FELLOW_RULE") {
            config.fellow_rule = Some(val.parse().map_err(|_| Error::Validation {
                field: "AMITY_FELLOW_RULE".into(),
                message: format!("Must be strict or accommodation, got '{val}'"),
            })?);
        }

        if let Some(seconds) = Self::var("AMITY_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.parse().map_err(|_| Error::Validation {
                    field: "AMITY_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Some(format) = Self::var("AMITY_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse().map_err(|_| Error::Validation {
                field: "AMITY_OUTPUT_FORMAT".into(),
                message: format!("Must be table, json or csv, got '{format}'"),
            })?);
        }

        if let Some(file) = Self::var("AMITY_STATE_FILE") {
            config.state_file = Some(file);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }
}
