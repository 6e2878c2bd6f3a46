//! Path relationship checking.
//!
//! All helpers here are lexical and component-wise: `/srv/data` contains
//! `/srv/data/x` but not `/srv/database`. Callers are expected to pass
//! canonical paths.

use std::path::{Path, PathBuf};

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use pathward::path::PathRelationship;
/// use std::path::Path;
///
/// assert_eq!(
///     PathRelationship::between(Path::new("/srv"), Path::new("/srv/data")),
///     PathRelationship::Ancestor
/// );
/// assert_eq!(
///     PathRelationship::between(Path::new("/srv/data"), Path::new("/srv/database")),
///     PathRelationship::Unrelated
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,
    /// The first path is a descendant of the second.
    Descendant,
    /// The paths are the same.
    Same,
    /// Neither contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        if path1.components().eq(path2.components()) {
            Self::Same
        } else if path2.starts_with(path1) {
            Self::Ancestor
        } else if path1.starts_with(path2) {
            Self::Descendant
        } else {
            Self::Unrelated
        }
    }

    /// Check if a path is within a directory (descendant or same).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// assert!(PathRelationship::is_within(Path::new("/a/b"), Path::new("/a")));
    /// assert!(PathRelationship::is_within(Path::new("/a"), Path::new("/a/")));
    /// assert!(!PathRelationship::is_within(Path::new("/ab"), Path::new("/a")));
    /// ```
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }

    /// Index of the first prefix in `prefixes` that contains `path`.
    ///
    /// Order matters: the earliest match wins even if a later prefix is more
    /// specific.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// let prefixes = [Path::new("/srv"), Path::new("/srv/data")];
    /// assert_eq!(
    ///     PathRelationship::first_containing(Path::new("/srv/data/x"), prefixes),
    ///     Some(0)
    /// );
    /// ```
    pub fn first_containing<'a, I>(path: &Path, prefixes: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        prefixes
            .into_iter()
            .position(|prefix| Self::is_within(path, prefix))
    }

    /// The `levels`-th ancestor of `path`, clamped at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::path::PathRelationship;
    /// use std::path::{Path, PathBuf};
    ///
    /// assert_eq!(PathRelationship::ancestor(Path::new("/a/b/c"), 2), PathBuf::from("/a"));
    /// assert_eq!(PathRelationship::ancestor(Path::new("/a"), 5), PathBuf::from("/"));
    /// ```
    #[must_use]
    pub fn ancestor(path: &Path, levels: usize) -> PathBuf {
        let mut current = path;
        for _ in 0..levels {
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current.to_path_buf()
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &Path, path2: &Path) -> String {
        let (a, b) = (path1.display(), path2.display());
        match self {
            Self::Ancestor => format!("{a} is an ancestor of {b}"),
            Self::Descendant => format!("{a} is a descendant of {b}"),
            Self::Same => format!("{a} and {b} are the same path"),
            Self::Unrelated => format!("{a} and {b} are unrelated paths"),
        }
    }
}
