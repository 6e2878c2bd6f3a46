//! Path canonicalization functions.
//!
//! This module provides functionality to canonicalize paths by following
//! symlinks to their real paths, with support for:
//! - Full canonicalization of existing paths
//! - Partial canonicalization for paths whose tail does not exist yet
//! - Bounded symlink-chain resolution with loop detection
//!
//! `..` is always applied after the symlinks in front of it have been
//! followed, the way the kernel walks a path. Only a tail that does not
//! exist yet is folded lexically.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::{absolute_path, resolve_components};

/// Default bound on symlink hops, matching the common kernel limit.
pub const DEFAULT_MAX_SYMLINK_HOPS: usize = 40;

/// Canonicalize an existing path by following every symlink.
///
/// # Errors
///
/// Returns `PathNotFound` or `PermissionDenied` for the matching I/O
/// failures and `Filesystem` for anything else (including kernel-detected
/// symlink loops in parent components).
///
/// # Examples
///
/// ```no_run
/// use pathward::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::filesystem(path, e),
    })
}

/// Resolve a symlink chain to the real path of its final target.
///
/// Each hop is read with `read_link`; relative targets are resolved against
/// the link's parent. The walk stops with [`Error::SymlinkLoop`] when a path
/// repeats or more than `max_hops` links have been followed, so cyclic links
/// can never spin forever. Once a non-link is reached the result is passed
/// through `fs::canonicalize` so symlinked parent directories are resolved
/// too.
///
/// A path that is not a symlink at all resolves to its canonical form.
///
/// # Errors
///
/// - `PathNotFound` if `path` itself does not exist
/// - `BrokenSymlink` if a link target does not exist
/// - `SymlinkLoop` on cycles or when `max_hops` is exceeded
/// - `Filesystem` for other I/O failures
///
/// # Examples
///
/// ```no_run
/// use pathward::path::canonicalize::resolve_symlink;
/// use std::path::Path;
///
/// let real = resolve_symlink(Path::new("/usr/bin/python3"), 40).unwrap();
/// assert!(real.is_absolute());
/// ```
pub fn resolve_symlink(path: &Path, max_hops: usize) -> Result<PathBuf> {
    let mut visited = HashSet::new();
    let mut current = path.to_path_buf();
    let mut hops = 0usize;

    loop {
        if !visited.insert(current.clone()) {
            return Err(Error::SymlinkLoop { path: current });
        }

        match fs::read_link(&current) {
            Ok(target) => {
                if hops >= max_hops {
                    return Err(Error::SymlinkLoop {
                        path: path.to_path_buf(),
                    });
                }
                let next = if target.is_absolute() {
                    target
                } else {
                    current
                        .parent()
                        .ok_or_else(|| Error::InvalidPath {
                            path: current.clone(),
                            reason: "Symlink has no parent directory".to_string(),
                        })?
                        .join(target)
                };
                current = anchor(&next)?;
                hops += 1;
            }
            // Not a symlink: the chain ends here.
            Err(e) if e.kind() == ErrorKind::InvalidInput => {
                return fs::canonicalize(&current).map_err(|e| dangling(path, &current, hops, e));
            }
            Err(e) => return Err(dangling(path, &current, hops, e)),
        }
    }
}

/// Map a failure at `current` while resolving `origin` to an error.
fn dangling(origin: &Path, current: &Path, hops: usize, e: std::io::Error) -> Error {
    match e.kind() {
        ErrorKind::NotFound if hops == 0 => Error::PathNotFound {
            path: origin.to_path_buf(),
        },
        ErrorKind::NotFound => Error::BrokenSymlink {
            path: origin.to_path_buf(),
            target: current.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: current.to_path_buf(),
        },
        _ => Error::filesystem(current, e),
    }
}

/// Canonicalize the existing portion of a path.
///
/// For paths that do not exist (yet), components are resolved one at a
/// time while they exist, so a `..` after a symlink climbs out of the
/// link's target. Once a component is missing, the rest is folded
/// lexically and returned separately; a `..` that pops every missing name
/// resumes resolution on disk. Dangling symlinks count as non-existent.
///
/// # Returns
///
/// A tuple of the canonicalized existing portion and the remaining
/// components, if any.
///
/// # Errors
///
/// Returns `InvalidPath` for a relative path that does not exist.
///
/// # Examples
///
/// ```no_run
/// use pathward::path::canonicalize::canonicalize_existing;
/// use std::path::{Path, PathBuf};
///
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/nonexistent/file")).unwrap();
/// assert_eq!(remainder, Some(PathBuf::from("nonexistent/file")));
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    if let Ok(canonical) = canonicalize(path) {
        return Ok((canonical, None));
    }

    if !path.has_root() {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Cannot find any existing portion of path".to_string(),
        });
    }

    // `resolved` is always a real path; `missing` holds the names below it
    // that do not exist.
    let mut resolved = PathBuf::new();
    let mut missing: Vec<OsString> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if missing.pop().is_none() {
                    resolved.pop();
                }
            }
            Component::Normal(name) => {
                if missing.is_empty() {
                    if let Ok(real) = fs::canonicalize(resolved.join(name)) {
                        resolved = real;
                        continue;
                    }
                }
                missing.push(name.to_os_string());
            }
        }
    }

    let remainder = if missing.is_empty() {
        None
    } else {
        Some(missing.into_iter().collect())
    };
    Ok((resolved, remainder))
}

/// Canonicalize as much of `path` as exists and re-append the rest.
///
/// This is the canonical form used for every comparison in the crate: a
/// not-yet-created file beneath a symlinked directory compares equal to the
/// same file beneath the directory's real location.
///
/// # Errors
///
/// Same as [`canonicalize_existing`].
pub fn canonicalize_partial(path: &Path) -> Result<PathBuf> {
    let (canonical, remainder) = canonicalize_existing(path)?;
    Ok(match remainder {
        Some(rest) => canonical.join(rest),
        None => canonical,
    })
}

/// Canonical form of caller-supplied input.
///
/// The input is made absolute, checked for lexical root escapes like
/// [`normalize`](super::normalize::normalize), and then resolved with
/// [`canonicalize_partial`] on the unfolded path. `allowed/link/../x`
/// therefore lands beside the link's target, not beside the link.
///
/// # Errors
///
/// `InvalidPath` for empty, NUL-bearing or root-escaping input; otherwise
/// the errors of [`canonicalize_existing`].
///
/// # Examples
///
/// ```no_run
/// use pathward::path::canonicalize::canonical_path;
/// use std::path::Path;
///
/// let canonical = canonical_path(Path::new("/tmp/./not-created-yet")).unwrap();
/// assert!(canonical.ends_with("not-created-yet"));
/// ```
pub fn canonical_path(path: &Path) -> Result<PathBuf> {
    let absolute = absolute_path(path)?;
    resolve_components(&absolute)?;
    canonicalize_partial(&absolute)
}

/// Resolve everything but the last component of a symlink hop.
///
/// The last component has to stay as written so the next `read_link` sees
/// the link itself.
fn anchor(path: &Path) -> Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if parent.has_root() => {
            Ok(canonicalize_partial(parent)?.join(name))
        }
        _ => Ok(path.to_path_buf()),
    }
}
