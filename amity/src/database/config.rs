//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the working state store inside the data directory.
pub const STATE_FILE: &str = "amity.db";

/// Default file name for exported state.
pub const DEFAULT_EXPORT_FILE: &str = "amity.sqlite";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use amity::database::DatabaseConfig;
/// use std::time::Duration;
///
/// // Create a configuration with default settings
/// let config = DatabaseConfig::new("/tmp/amity.db");
///
/// // Customize the configuration
/// let config = DatabaseConfig::new("/tmp/amity.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to create the database (and its directory) if missing.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/amity.db");
    /// assert_eq!(config.path.to_str().unwrap(), "/tmp/amity.db");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// This is how long a connection waits on a locked store before giving
    /// up with an error.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Requires the database file to exist already.
    ///
    /// # Examples
    ///
    /// ```
    /// use amity::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/amity.db").existing_only();
    /// assert!(!config.auto_create);
    /// assert!(!config.read_only);
    /// ```
    #[must_use]
    pub fn existing_only(mut self) -> Self {
        self.auto_create = false;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.amity`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use amity::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".amity"))
        .ok_or_else(|| Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// Resolves the working state path using environment variables or defaults.
///
/// The resolution order is:
/// 1. `$AMITY_DATA_DIR/amity.db` if the `AMITY_DATA_DIR` environment variable is set
/// 2. `~/.amity/amity.db` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined and
/// `AMITY_DATA_DIR` is not set.
pub fn resolve_database_path() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var("AMITY_DATA_DIR") {
        Ok(PathBuf::from(data_dir).join(STATE_FILE))
    } else {
        Ok(default_data_dir()?.join(STATE_FILE))
    }
}
