//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHWARD_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides the temp root.
pub const TEMP_ROOT_ENV: &str = "PATHWARD_TEMP_ROOT";
/// Overrides the data root.
pub const DATA_ROOT_ENV: &str = "PATHWARD_DATA_ROOT";
/// Overrides the web root.
pub const WEB_ROOT_ENV: &str = "PATHWARD_WEB_ROOT";
/// Overrides `traversal.follow_symlinks`.
pub const FOLLOW_SYMLINKS_ENV: &str = "PATHWARD_FOLLOW_SYMLINKS";
/// Overrides `traversal.follow_hidden`.
pub const FOLLOW_HIDDEN_ENV: &str = "PATHWARD_FOLLOW_HIDDEN";
/// Adds to `traversal.extension_allow` (comma-separated).
pub const EXTENSION_ALLOW_ENV: &str = "PATHWARD_EXTENSION_ALLOW";
/// Adds to `traversal.extension_deny` (comma-separated).
pub const EXTENSION_DENY_ENV: &str = "PATHWARD_EXTENSION_DENY";
/// Overrides `mounts.table_path`.
pub const MOUNT_TABLE_ENV: &str = "PATHWARD_MOUNT_TABLE";
/// Overrides `max_symlink_depth`.
pub const MAX_SYMLINK_DEPTH_ENV: &str = "PATHWARD_MAX_SYMLINK_DEPTH";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathward::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value (for example a
    /// non-numeric depth or an unrecognized boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_root_overrides(config);
        Self::apply_traversal_overrides(config)?;

        if let Ok(path) = env::var(MOUNT_TABLE_ENV) {
            config
                .mounts
                .get_or_insert_with(Default::default)
                .table_path = Some(PathBuf::from(path));
        }

        if let Ok(depth) = env::var(MAX_SYMLINK_DEPTH_ENV) {
            config.max_symlink_depth = Some(depth.trim().parse().map_err(|_| Error::Validation {
                field: MAX_SYMLINK_DEPTH_ENV.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        Ok(())
    }

    fn apply_root_overrides(config: &mut Config) {
        for (var, slot) in [
            (TEMP_ROOT_ENV, 0usize),
            (DATA_ROOT_ENV, 1),
            (WEB_ROOT_ENV, 2),
        ] {
            if let Ok(value) = env::var(var) {
                let roots = config.roots.get_or_insert_with(Default::default);
                let target = match slot {
                    0 => &mut roots.temp,
                    1 => &mut roots.data,
                    _ => &mut roots.web,
                };
                *target = Some(PathBuf::from(value));
            }
        }
    }

    fn apply_traversal_overrides(config: &mut Config) -> Result<()> {
        let mut traversal = config.traversal.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var(FOLLOW_SYMLINKS_ENV) {
            traversal.follow_symlinks = Some(Self::parse_bool(FOLLOW_SYMLINKS_ENV, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(FOLLOW_HIDDEN_ENV) {
            traversal.follow_hidden = Some(Self::parse_bool(FOLLOW_HIDDEN_ENV, &val)?);
            modified = true;
        }

        if let Ok(val) = env::var(EXTENSION_ALLOW_ENV) {
            traversal
                .extension_allow
                .get_or_insert_with(Vec::new)
                .extend(Self::parse_list(&val));
            modified = true;
        }

        if let Ok(val) = env::var(EXTENSION_DENY_ENV) {
            traversal
                .extension_deny
                .get_or_insert_with(Vec::new)
                .extend(Self::parse_list(&val));
            modified = true;
        }

        if modified {
            config.traversal = Some(traversal);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Split a comma-separated list, dropping empty items.
    fn parse_list(s: &str) -> impl Iterator<Item = String> + '_ {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
    }
}
