//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::database::default_data_dir;
use crate::error::Result;

/// File name of the user configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// A configuration file and what it contained.
///
/// # Examples
///
/// ```
/// use amity::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.amity/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that exists, lowest precedence first.
    ///
    /// Today that is only the user config at `{data_dir}/config.yaml`, or
    /// `~/.amity/config.yaml` when `data_dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        let path = match data_dir {
            Some(dir) => dir.join(CONFIG_FILE),
            None => Self::user_config_path()?,
        };
        if path.exists() {
            let config = Self::load_file(&path)?;
            sources.push(ConfigSource {
                path,
                precedence: 1,
                config,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    /// Loads and parses a single YAML configuration file.
    ///
    /// An empty file is an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`crate::Error::Configuration`] if its YAML is invalid or has unknown fields.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        log::debug!("loading configuration from {}", path.display());
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// The default user configuration path, `~/.amity/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_config_path() -> Result<PathBuf> {
        Ok(default_data_dir()?.join(CONFIG_FILE))
    }
}
