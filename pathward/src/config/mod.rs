//! Configuration system for pathward.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHWARD_*`)
//! 3. Private project config (`pathward.local.yaml`)
//! 4. Project config (`pathward.yaml`)
//! 5. User config (`~/.pathward/config.yaml`)
//!
//! Restriction paths, skip prefixes and extension lists accumulate across
//! layers; every other value is replaced by the higher layer.
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use pathward::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use pathward::config::{Config, ConfigBuilder, TraversalConfig};
//!
//! let custom = Config {
//!     traversal: Some(TraversalConfig {
//!         recurse: Some(true),
//!         extension_deny: Some(vec!["exe".to_string()]),
//!         ..Default::default()
//!     }),
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
//! assert_eq!(config.traversal.unwrap().recurse, Some(true));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    Config, MountConfig, RestrictedPath, RestrictionConfig, RootsConfig, TraversalConfig,
};
pub use validator::ConfigValidator;
