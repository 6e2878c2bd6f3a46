//! Configuration validation.
//!
//! This module checks a merged configuration for values that would only
//! fail later, deep inside a traversal or a restriction check.

use crate::config::schema::{Config, RestrictionConfig, TraversalConfig};
use crate::error::{Error, Result};
use crate::path::canonicalize::DEFAULT_MAX_SYMLINK_HOPS;
use std::path::Path;

/// Upper bound accepted for `max_symlink_depth`.
pub const MAX_SYMLINK_DEPTH_LIMIT: usize = 1024;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use pathward::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref restrictions) = config.restrictions {
            Self::validate_restrictions(restrictions)?;
        }

        if let Some(ref traversal) = config.traversal {
            Self::validate_traversal(traversal)?;
        }

        if let Some(ref roots) = config.roots {
            for (name, path) in roots.named() {
                Self::validate_path(&format!("roots.{name}"), path)?;
            }
        }

        if let Some(depth) = config.max_symlink_depth {
            if depth == 0 || depth > MAX_SYMLINK_DEPTH_LIMIT {
                return Err(Error::Validation {
                    field: "max_symlink_depth".into(),
                    message: format!(
                        "Must be between 1 and {MAX_SYMLINK_DEPTH_LIMIT} (default {DEFAULT_MAX_SYMLINK_HOPS})"
                    ),
                });
            }
        }

        Ok(())
    }

    fn validate_restrictions(config: &RestrictionConfig) -> Result<()> {
        if let Some(ref label) = config.label {
            Self::validate_identifier("restrictions.label", label)?;
        }

        let paths = config.paths.as_deref().unwrap_or_default();
        if config.allow_all == Some(true) && !paths.is_empty() {
            return Err(Error::Validation {
                field: "restrictions.allow_all".into(),
                message: "Cannot be combined with explicit paths".into(),
            });
        }

        for (index, entry) in paths.iter().enumerate() {
            Self::validate_path(&format!("restrictions.paths[{index}]"), &entry.path)?;
        }

        Ok(())
    }

    fn validate_traversal(config: &TraversalConfig) -> Result<()> {
        for extension in config.extension_allow.iter().flatten() {
            Self::validate_extension("traversal.extension_allow", extension)?;
        }
        for extension in config.extension_deny.iter().flatten() {
            Self::validate_extension("traversal.extension_deny", extension)?;
        }
        for (index, prefix) in config.skip.iter().flatten().enumerate() {
            Self::validate_path(&format!("traversal.skip[{index}]"), prefix)?;
        }

        if let Some(mode) = config.temporary_mode {
            if mode > 0o7777 {
                return Err(Error::Validation {
                    field: "traversal.temporary_mode".into(),
                    message: format!("Mode {mode:o} has bits outside 0o7777"),
                });
            }
        }

        Ok(())
    }

    /// Labels must be non-empty after trimming and free of null bytes.
    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        Ok(())
    }

    fn validate_path(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Path cannot be empty".into(),
            });
        }
        Ok(())
    }

    /// An extension is a single name component, optionally with one leading dot.
    fn validate_extension(field: &str, extension: &str) -> Result<()> {
        let bare = extension.trim().strip_prefix('.').unwrap_or(extension.trim());

        if bare.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Extension cannot be empty".into(),
            });
        }

        if bare.contains(['.', '/', '\\', '\0']) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid extension '{extension}'"),
            });
        }

        Ok(())
    }
}
