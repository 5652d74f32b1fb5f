//! Configuration validation.

use std::path::Path;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use amity::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref file) = config.state_file {
            Self::validate_state_file(file)?;
        }

        Ok(())
    }

    fn validate_state_file(file: &str) -> Result<()> {
        let invalid = |message: &str| Error::Validation {
            field: "state_file".into(),
            message: message.into(),
        };

        if file.trim().is_empty() {
            return Err(invalid("State file name cannot be empty"));
        }
        if Path::new(file).file_name().is_none() {
            return Err(invalid("State file must name a file, not a directory"));
        }
        if file.contains('\0') {
            return Err(invalid("State file name cannot contain NUL"));
        }
        Ok(())
    }
}
