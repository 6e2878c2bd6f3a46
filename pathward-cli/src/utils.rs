//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, building library objects from the
//! loaded configuration, and path display.

use crate::error::CliError;
use pathward::config::{Config, ConfigBuilder};
use pathward::mount::ProcMounts;
use pathward::{PathResolver, RestrictionSet};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Configuration files (project, then user)
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Path resolver honoring `max_symlink_depth`.
pub fn resolver_for(config: &Config) -> PathResolver {
    match config.max_symlink_depth {
        Some(depth) => PathResolver::new().with_max_symlink_depth(depth),
        None => PathResolver::new(),
    }
}

/// Restriction set described by the `restrictions` section.
///
/// Without that section the set is empty, so every check is denied.
pub fn restrictions_for(config: &Config) -> Result<RestrictionSet, CliError> {
    match config.restrictions {
        Some(ref section) => Ok(RestrictionSet::from_config(section)?),
        None => Ok(RestrictionSet::new("default")),
    }
}

/// Mount-table source from `--table`, then config, then `/proc/mounts`.
pub fn mount_source_for(explicit: Option<&Path>, config: &Config) -> ProcMounts {
    let configured = config.mounts.as_ref().and_then(|m| m.table_path.as_deref());
    match explicit.or(configured) {
        Some(path) => ProcMounts::at(path),
        None => ProcMounts::new(),
    }
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
