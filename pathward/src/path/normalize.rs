//! Path normalization functions.
//!
//! This module provides functionality to normalize user-supplied paths by:
//! - Rejecting empty input and embedded NUL bytes
//! - Expanding a leading tilde (~) to the home directory
//! - Converting relative paths to absolute paths
//! - Resolving `.` and `..` components lexically
//! - Collapsing repeated separators
//!
//! Normalization never touches the filesystem beyond reading the current
//! directory and home directory; see [`super::canonicalize`] for symlink
//! resolution.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::types::NormalizedPath;

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use pathward::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        // Non-UTF-8 paths cannot carry the home marker we recognize.
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// Repeated separators disappear because `Path::components` never yields
/// empty components.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components that would
/// escape the root directory. Escaping is reported rather than clamped so
/// that traversal attempts like `/srv/../../etc` are visible to the caller.
///
/// # Examples
///
/// ```
/// use pathward::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
///
/// let resolved = resolve_components(Path::new("/a//b///c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/b/c"));
///
/// assert!(resolve_components(Path::new("/a/../..")).is_err());
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(component),
            Component::Normal(c) => {
                result.push(c);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
                result.pop();
                depth -= 1;
            }
        }
    }

    Ok(result)
}

/// Whether the raw input explicitly names a directory.
///
/// True for a trailing separator or a trailing `.`/`..` segment.
fn denotes_directory(path: &Path) -> bool {
    let raw = path.as_os_str().to_string_lossy();
    if raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) || raw.ends_with("/.") {
        return true;
    }
    matches!(
        path.components().next_back(),
        Some(Component::CurDir | Component::ParentDir | Component::RootDir)
    )
}

/// Normalize a path to absolute form.
///
/// This is the main normalization function that:
/// 1. Rejects empty input and NUL bytes
/// 2. Expands tilde (~) if present
/// 3. Converts relative paths to absolute (using current directory)
/// 4. Resolves `.` and `..` components
///
/// The returned [`NormalizedPath`] remembers whether the input explicitly
/// denoted a directory, in which case its display form keeps one trailing
/// separator.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the input is empty, contains a NUL
/// byte, uses `~user` syntax, or escapes the root; also if the current
/// directory cannot be determined.
///
/// # Examples
///
/// ```
/// use pathward::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(normalized.as_path(), Path::new("/a/c"));
/// assert!(!normalized.denotes_directory());
///
/// let dir = normalize(Path::new("/srv//uploads/")).unwrap();
/// assert_eq!(dir.to_string(), "/srv/uploads/");
///
/// assert!(normalize(Path::new("")).is_err());
/// ```
pub fn normalize(path: &Path) -> Result<NormalizedPath> {
    let directory = denotes_directory(path);
    let absolute = absolute_path(path)?;
    NormalizedPath::new(resolve_components(&absolute)?, directory)
}

/// Make a path absolute without resolving any `.` or `..` component.
///
/// Rejects empty input and NUL bytes, expands a leading tilde and joins
/// relative input onto the current directory. The result still carries
/// every `..` of the input, so it can be resolved against the filesystem
/// in kernel order (see [`super::canonicalize::canonical_path`]).
///
/// # Errors
///
/// Same as [`normalize`], except that escaping the root is not detected.
///
/// # Examples
///
/// ```
/// use pathward::path::normalize::absolute_path;
/// use std::path::Path;
///
/// let absolute = absolute_path(Path::new("/srv/link/../data")).unwrap();
/// assert_eq!(absolute, Path::new("/srv/link/../data"));
/// ```
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            path: PathBuf::new(),
            reason: "Path is empty".to_string(),
        });
    }

    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Path contains a NUL byte".to_string(),
        });
    }

    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Cannot get current directory: {e}"),
    })?;
    Ok(cwd.join(expanded))
}

/// Normalize a path and drop the directory marker.
///
/// # Errors
///
/// Same as [`normalize`].
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    normalize(path).map(NormalizedPath::into_path_buf)
}
