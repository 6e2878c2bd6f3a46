//! Restriction set implementation.

use std::path::{Component, Path, PathBuf};

use crate::config::RestrictionConfig;
use crate::error::{Error, Result};
use crate::path::canonicalize::{canonical_path, canonicalize_partial};
use crate::path::PathRelationship;

/// Label reported by the unrestricted policy.
pub const ALLOW_ALL_LABEL: &str = "unrestricted";

/// Label used when a configured set does not name itself.
const DEFAULT_LABEL: &str = "default";

/// One allow-list entry: a canonical prefix and whether writes are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestrictionEntry {
    prefix: PathBuf,
    write: bool,
}

impl RestrictionEntry {
    /// The canonical prefix this entry covers.
    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Whether paths under this prefix may be written.
    #[must_use]
    pub fn write_allowed(&self) -> bool {
        self.write
    }

    /// Whether `canonical` lies at or beneath this entry's prefix.
    #[must_use]
    pub fn covers(&self, canonical: &Path) -> bool {
        PathRelationship::is_within(canonical, &self.prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    AllowAll,
    Prefixes {
        label: String,
        entries: Vec<RestrictionEntry>,
    },
}

/// An ordered allow-list of path prefixes with per-entry write permission.
///
/// See the [module documentation](crate::restriction) for the matching
/// rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionSet {
    scope: Scope,
}

impl RestrictionSet {
    /// Create an empty set. It denies everything until paths are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::{Error, RestrictionSet};
    ///
    /// let set = RestrictionSet::new("uploads");
    /// assert!(set.is_empty());
    /// assert!(matches!(
    ///     set.check_read("/tmp").unwrap_err(),
    ///     Error::NoRestrictionsConfigured { .. }
    /// ));
    /// ```
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            scope: Scope::Prefixes {
                label: label.into(),
                entries: Vec::new(),
            },
        }
    }

    /// The unrestricted policy: every check succeeds, for any input.
    ///
    /// Reserved for trusted internal callers.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::RestrictionSet;
    ///
    /// let set = RestrictionSet::allow_all();
    /// assert!(set.check("", true).is_ok());
    /// assert!(set.check("\0garbage", true).is_ok());
    /// ```
    #[must_use]
    pub fn allow_all() -> Self {
        Self {
            scope: Scope::AllowAll,
        }
    }

    /// Build a set from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `allow_all` is combined with explicit paths, or
    /// if a configured path cannot be canonicalized.
    pub fn from_config(config: &RestrictionConfig) -> Result<Self> {
        let paths = config.paths.as_deref().unwrap_or_default();

        if config.allow_all == Some(true) {
            if !paths.is_empty() {
                return Err(Error::Validation {
                    field: "restrictions.allow_all".to_string(),
                    message: "cannot be combined with explicit paths".to_string(),
                });
            }
            return Ok(Self::allow_all());
        }

        let mut set = Self::new(config.label.as_deref().unwrap_or(DEFAULT_LABEL));
        for entry in paths {
            set.add_path(&entry.path, entry.write)?;
        }
        Ok(set)
    }

    /// Human-readable label used in error messages.
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.scope {
            Scope::AllowAll => ALLOW_ALL_LABEL,
            Scope::Prefixes { label, .. } => label,
        }
    }

    /// Whether this is the unrestricted policy.
    #[must_use]
    pub fn is_allow_all(&self) -> bool {
        matches!(self.scope, Scope::AllowAll)
    }

    /// Entries in match order. Always empty for the unrestricted policy.
    #[must_use]
    pub fn entries(&self) -> &[RestrictionEntry] {
        match &self.scope {
            Scope::AllowAll => &[],
            Scope::Prefixes { entries, .. } => entries,
        }
    }

    /// Whether the set has no entries (and is not the unrestricted policy).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.scope {
            Scope::AllowAll => false,
            Scope::Prefixes { entries, .. } => entries.is_empty(),
        }
    }

    /// Canonicalize `path` and append it as a new, lowest-precedence entry.
    ///
    /// # Errors
    ///
    /// Returns `Validation` on the unrestricted policy (it has nothing to
    /// add to), or the canonicalization error for an invalid path.
    pub fn add_path(&mut self, path: impl AsRef<Path>, write: bool) -> Result<()> {
        match &mut self.scope {
            Scope::AllowAll => Err(Error::Validation {
                field: "restrictions".to_string(),
                message: "cannot add paths to an unrestricted policy".to_string(),
            }),
            Scope::Prefixes { entries, .. } => {
                let prefix = canonical_path(path.as_ref())?;
                entries.push(RestrictionEntry { prefix, write });
                Ok(())
            }
        }
    }

    /// Remove every entry. The set then denies everything.
    pub fn clear_paths(&mut self) {
        if let Scope::Prefixes { entries, .. } = &mut self.scope {
            entries.clear();
        }
    }

    /// Authorize `path` for reading, or for writing when `write` is set.
    ///
    /// # Errors
    ///
    /// - `NoRestrictionsConfigured` if the set has no entries
    /// - `PathRestricted` if no entry covers the canonical path
    /// - `WriteRestricted` if the deciding entry is read-only and `write`
    ///   was requested
    /// - the canonicalization error if `path` is invalid
    pub fn check(&self, path: impl AsRef<Path>, write: bool) -> Result<()> {
        if self.is_allow_all() {
            return Ok(());
        }
        if self.is_empty() {
            return Err(Error::NoRestrictionsConfigured {
                label: self.label().to_string(),
            });
        }
        let canonical = canonical_path(path.as_ref())?;
        self.check_canonical(&canonical, write)
    }

    /// [`check`](Self::check) for reading.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn check_read(&self, path: impl AsRef<Path>) -> Result<()> {
        self.check(path, false)
    }

    /// [`check`](Self::check) for writing.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check).
    pub fn check_write(&self, path: impl AsRef<Path>) -> Result<()> {
        self.check(path, true)
    }

    /// Authorize a path that is already in canonical form.
    ///
    /// Used by the traversal engine, which canonicalizes each entry once.
    ///
    /// # Errors
    ///
    /// Same as [`check`](Self::check), minus canonicalization failures.
    pub fn check_canonical(&self, canonical: &Path, write: bool) -> Result<()> {
        let (label, entries) = match &self.scope {
            Scope::AllowAll => return Ok(()),
            Scope::Prefixes { label, entries } => (label, entries),
        };
        if entries.is_empty() {
            return Err(Error::NoRestrictionsConfigured {
                label: label.clone(),
            });
        }

        match entries.iter().find(|entry| entry.covers(canonical)) {
            None => Err(Error::PathRestricted {
                path: canonical.to_path_buf(),
                label: label.clone(),
            }),
            Some(entry) if write && !entry.write => Err(Error::WriteRestricted {
                path: canonical.to_path_buf(),
                label: label.clone(),
            }),
            Some(entry) => {
                log::debug!(
                    "'{label}' permits {} {} via {}",
                    if write { "write to" } else { "read of" },
                    canonical.display(),
                    entry.prefix.display()
                );
                Ok(())
            }
        }
    }

    /// Derive a set whose prefixes are the `levels`-th ancestors of this
    /// set's prefixes, keeping each entry's write flag.
    ///
    /// Lets a caller create the parent directory of a path it may write
    /// before the path itself exists. Ancestors stop at the root.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathward::RestrictionSet;
    ///
    /// let mut set = RestrictionSet::new("uploads");
    /// set.add_path("/srv/uploads/2024", true).unwrap();
    ///
    /// let parent = set.with_parent(1);
    /// assert!(parent.check_write("/srv/uploads/2025").is_ok());
    /// ```
    #[must_use]
    pub fn with_parent(&self, levels: usize) -> Self {
        match &self.scope {
            Scope::AllowAll => Self::allow_all(),
            Scope::Prefixes { label, entries } => Self {
                scope: Scope::Prefixes {
                    label: label.clone(),
                    entries: entries
                        .iter()
                        .map(|entry| RestrictionEntry {
                            prefix: PathRelationship::ancestor(&entry.prefix, levels),
                            write: entry.write,
                        })
                        .collect(),
                },
            },
        }
    }

    /// Derive a narrower set scoped to `subpaths` beneath every entry.
    ///
    /// The result holds one entry per (entry, subpath) pair, in entry order
    /// then subpath order. Each new entry's write flag is `write` when
    /// given, otherwise the original entry's flag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if a subpath is absolute, climbs out of its
    /// entry with `..`, or resolves (through a symlink) outside its entry.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathward::RestrictionSet;
    ///
    /// let mut set = RestrictionSet::new("site");
    /// set.add_path("/var/www", true).unwrap();
    ///
    /// let assets = set.with_child(["assets", "media"], Some(false)).unwrap();
    /// assert_eq!(assets.entries().len(), 2);
    /// assert!(assets.check_read("/var/www/assets/logo.svg").is_ok());
    /// assert!(assets.check_write("/var/www/assets/logo.svg").is_err());
    /// assert!(assets.check_read("/var/www/index.html").is_err());
    /// ```
    pub fn with_child<I, P>(&self, subpaths: I, write: Option<bool>) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let (label, entries) = match &self.scope {
            Scope::AllowAll => return Ok(Self::allow_all()),
            Scope::Prefixes { label, entries } => (label, entries),
        };

        let subpaths = subpaths
            .into_iter()
            .map(|subpath| relative_subpath(subpath.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut derived = Vec::with_capacity(entries.len() * subpaths.len());
        for entry in entries {
            for subpath in &subpaths {
                let prefix = canonicalize_partial(&entry.prefix.join(subpath))?;
                if !entry.covers(&prefix) {
                    return Err(Error::InvalidPath {
                        path: entry.prefix.join(subpath),
                        reason: format!("resolves outside {}", entry.prefix.display()),
                    });
                }
                derived.push(RestrictionEntry {
                    prefix,
                    write: write.unwrap_or(entry.write),
                });
            }
        }

        Ok(Self {
            scope: Scope::Prefixes {
                label: label.clone(),
                entries: derived,
            },
        })
    }
}

/// Lexically resolve a subpath, refusing anything that leaves its base.
fn relative_subpath(subpath: &Path) -> Result<PathBuf> {
    let invalid = |reason: &str| Error::InvalidPath {
        path: subpath.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut resolved = PathBuf::new();
    for component in subpath.components() {
        match component {
            Component::Normal(name) => resolved.push(name),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(invalid("climbs above its base directory"));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("subpath must be relative"));
            }
        }
    }
    Ok(resolved)
}
