//! Path resolution entry point.
//!
//! `PathResolver` bundles normalization and symlink handling behind one
//! configurable value so that every component compares paths in the same
//! canonical form.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::path::canonicalize::{self, DEFAULT_MAX_SYMLINK_HOPS};
use crate::path::normalize;
use crate::path::types::NormalizedPath;

/// Resolves user-supplied paths into normalized and canonical forms.
///
/// # Examples
///
/// ```no_run
/// use pathward::path::PathResolver;
/// use std::path::Path;
///
/// let resolver = PathResolver::new();
///
/// let normalized = resolver.normalize(Path::new("~/project/../notes/")).unwrap();
/// assert!(normalized.denotes_directory());
///
/// let canonical = resolver.canonical(Path::new("/tmp/not-created-yet")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    /// Maximum symlink hops before a chain is treated as a loop.
    max_symlink_depth: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self {
            max_symlink_depth: DEFAULT_MAX_SYMLINK_HOPS,
        }
    }
}

impl PathResolver {
    /// Create a new path resolver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the maximum symlink depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::path::PathResolver;
    ///
    /// let resolver = PathResolver::new().with_max_symlink_depth(8);
    /// assert_eq!(resolver.max_symlink_depth(), 8);
    /// ```
    #[must_use]
    pub fn with_max_symlink_depth(mut self, depth: usize) -> Self {
        self.max_symlink_depth = depth;
        self
    }

    /// The configured symlink hop bound.
    #[must_use]
    pub fn max_symlink_depth(&self) -> usize {
        self.max_symlink_depth
    }

    /// Normalize without touching symlinks.
    ///
    /// # Errors
    ///
    /// See [`normalize::normalize`].
    pub fn normalize(&self, path: &Path) -> Result<NormalizedPath> {
        normalize::normalize(path)
    }

    /// Canonicalize the existing portion of the path, following symlinks
    /// before applying any `..` that comes after them.
    ///
    /// This is the form stored in restriction sets and compared against
    /// skip prefixes and mount targets.
    ///
    /// # Errors
    ///
    /// See [`canonicalize::canonical_path`].
    pub fn canonical(&self, path: &Path) -> Result<PathBuf> {
        canonicalize::canonical_path(path)
    }

    /// Normalize, then follow the symlink chain at `path` to its target.
    ///
    /// # Errors
    ///
    /// Returns `BrokenSymlink`, `SymlinkLoop` or `PathNotFound` as described
    /// in [`canonicalize::resolve_symlink`].
    pub fn resolve_symlink(&self, path: &Path) -> Result<PathBuf> {
        let absolute = normalize::absolute_path(path)?;
        normalize::resolve_components(&absolute)?;
        canonicalize::resolve_symlink(&absolute, self.max_symlink_depth)
    }
}
