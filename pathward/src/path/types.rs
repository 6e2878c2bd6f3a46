//! Core types for path handling.

use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{Error, Result};

/// A path that has been normalized to absolute form.
///
/// Normalization includes tilde expansion, conversion to an absolute path,
/// resolution of `.` and `..` components and separator collapsing. The path
/// itself never carries a trailing separator; whether the caller's input
/// explicitly named a directory is kept as a separate flag and only affects
/// [`Display`](fmt::Display).
///
/// # Examples
///
/// ```
/// use pathward::path::NormalizedPath;
/// use std::path::PathBuf;
///
/// let normalized = NormalizedPath::new(PathBuf::from("/srv/data"), true).unwrap();
/// assert_eq!(normalized.to_string(), "/srv/data/");
/// assert!(normalized.as_path().is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    path: PathBuf,
    directory: bool,
}

impl NormalizedPath {
    /// Create a new normalized path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn new(path: PathBuf, directory: bool) -> Result<Self> {
        if !path.is_absolute() {
            return Err(Error::InvalidPath {
                path,
                reason: "Path must be absolute after normalization".to_string(),
            });
        }
        Ok(Self { path, directory })
    }

    /// Get a reference to the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Whether the original input explicitly denoted a directory.
    #[must_use]
    pub fn denotes_directory(&self) -> bool {
        self.directory
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.path.display().to_string();
        if self.directory && !shown.ends_with(MAIN_SEPARATOR) {
            write!(f, "{shown}{MAIN_SEPARATOR}")
        } else {
            write!(f, "{shown}")
        }
    }
}
