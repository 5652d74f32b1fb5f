//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from files, environment and programmatic overrides.
///
/// # Examples
///
/// ```no_run
/// use amity::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_data_dir("/srv/amity")
///     .build()
///     .unwrap();
/// println!("fellow rule: {}", config.fellow_rule());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Starts from built-in defaults with every source enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the user config from `dir` instead of `~/.amity`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `AMITY_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merges all sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            ConfigMerger::merge(ConfigLoader::load_all(self.data_dir.as_deref())?)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::CONFIG_FILE;
    use crate::config::OutputFormat;
    use crate::person::FellowAllocationRule;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_precedence_file_env_override() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "fellow_rule: accommodation\noutput_format: csv\nstate_file: file.sqlite\n",
        )
        .unwrap();
        std::env::set_var("AMITY_OUTPUT_FORMAT", "json");

        let result = ConfigBuilder::new()
            .with_data_dir(dir.path())
            .with_config(Config {
                state_file: Some("override.sqlite".into()),
                ..Config::default()
            })
            .build();
        std::env::remove_var("AMITY_OUTPUT_FORMAT");
        let config = result.unwrap();

        assert_eq!(config.fellow_rule(), FellowAllocationRule::Accommodation);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.state_file(), "override.sqlite");
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Config::default()
            })
            .build();
        assert!(result.is_err());
    }
}
