//! Configuration system for amity.
//!
//! This module provides layered configuration with support for:
//! - A YAML user configuration file (`<data-dir>/config.yaml`)
//! - Environment variable overrides (`AMITY_*`)
//! - Programmatic configuration via builder pattern
//! - Validation of every merged value
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`AMITY_*`)
//! 3. User config (`~/.amity/config.yaml`, or under `--data-dir`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use amity::config::{Config, ConfigBuilder};
//! use amity::FellowAllocationRule;
//!
//! let custom = Config {
//!     fellow_rule: Some(FellowAllocationRule::Accommodation),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.fellow_rule(), FellowAllocationRule::Accommodation);
//! assert_eq!(config.state_file(), "amity.sqlite");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat};
pub use validator::ConfigValidator;
