//! Error types for the pathward library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling. Restriction and
//! path errors are security relevant and are always surfaced to the caller;
//! traversal anomalies are reported through the `log` facade instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathward error.
///
/// # Examples
///
/// ```
/// use pathward::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by caller-supplied traversal actions.
///
/// The library never inspects it; it is carried through
/// [`Error::Action`] so callers can downcast it again.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the pathward library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A symlink points at a target that does not exist.
    #[error("broken symlink {} -> {}", path.display(), target.display())]
    BrokenSymlink {
        /// The symlink being resolved.
        path: PathBuf,
        /// The missing target.
        target: PathBuf,
    },

    /// A symlink loop was detected, or the hop limit was exceeded.
    #[error("symlink loop detected: {}", path.display())]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
    },

    /// A restriction set without entries was asked to authorize a path.
    #[error("no restrictions configured for '{label}': access denied")]
    NoRestrictionsConfigured {
        /// Label of the empty restriction set.
        label: String,
    },

    /// The path is not beneath any permitted prefix.
    #[error("path {} is outside the paths permitted for '{label}'", path.display())]
    PathRestricted {
        /// The rejected (canonical) path.
        path: PathBuf,
        /// Label of the restriction set that rejected it.
        label: String,
    },

    /// The path is permitted for reading only.
    #[error("path {} is read-only for '{label}'", path.display())]
    WriteRestricted {
        /// The rejected (canonical) path.
        path: PathBuf,
        /// Label of the restriction set that rejected it.
        label: String,
    },

    /// A filesystem failure while walking a directory tree.
    #[error("traversal failed at {}: {source}", path.display())]
    Traversal {
        /// Where the traversal failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied traversal action failed.
    #[error("action failed for {}: {source}", path.display())]
    Action {
        /// The path the action was invoked on.
        path: PathBuf,
        /// The error returned by the action.
        #[source]
        source: ActionError,
    },

    /// The directory is not a mount target.
    #[error("not mounted: {}", path.display())]
    NotMounted {
        /// The (canonical) directory that was looked up.
        path: PathBuf,
    },

    /// The mount table text could not be parsed.
    #[error("malformed mount table at line {line}: {reason}")]
    MalformedMountTable {
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A file-handle operation failed.
    #[error("filesystem error on {}: {source}", path.display())]
    Filesystem {
        /// The path the operation targeted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } => true,
            Self::Filesystem { source, .. } | Self::Traversal { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error was raised by a restriction set.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::WriteRestricted {
    ///     path: PathBuf::from("/srv/data"),
    ///     label: "uploads".to_string(),
    /// };
    /// assert!(err.is_restriction());
    /// ```
    #[must_use]
    pub fn is_restriction(&self) -> bool {
        matches!(
            self,
            Self::NoRestrictionsConfigured { .. }
                | Self::PathRestricted { .. }
                | Self::WriteRestricted { .. }
        )
    }

    /// Wrap an I/O error from a file-handle operation on `path`.
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("/invalid/path"),
            reason: "escapes root".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/invalid/path"));
        assert!(display.contains("escapes root"));
    }

    #[test]
    fn test_restriction_errors_carry_label() {
        let err = Error::PathRestricted {
            path: PathBuf::from("/etc/passwd"),
            label: "uploads".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("uploads"));
        assert!(display.contains("passwd"));
        assert!(err.is_restriction());

        let err = Error::NoRestrictionsConfigured {
            label: "empty".to_string(),
        };
        assert!(format!("{err}").contains("no restrictions configured"));
        assert!(err.is_restriction());
    }

    #[test]
    fn test_broken_symlink_error() {
        let err = Error::BrokenSymlink {
            path: PathBuf::from("/tmp/link"),
            target: PathBuf::from("/tmp/missing"),
        };
        let display = format!("{err}");
        assert!(display.contains("broken symlink"));
        assert!(display.contains("missing"));
        assert!(!err.is_restriction());
    }

    #[test]
    fn test_malformed_mount_table_error() {
        let err = Error::MalformedMountTable {
            line: 3,
            reason: "expected 6 fields, found 4".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("line 3"));
        assert!(display.contains("found 4"));
    }

    #[test]
    fn test_action_error_keeps_source() {
        use std::error::Error as _;

        let inner: ActionError = "upload rejected".into();
        let err = Error::Action {
            path: PathBuf::from("/srv/a.txt"),
            source: inner,
        };
        assert!(format!("{err}").contains("upload rejected"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_filesystem_not_found() {
        let err = Error::filesystem(
            "/gone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(!err.is_permission_denied());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }
}
