//! The traversal engine.

use std::cell::Cell;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::fs::{LocalFile, TemporaryMode};
use crate::path::{PathRelationship, PathResolver};
use crate::restriction::RestrictionSet;
use crate::traversal::spec::{normalize_extension, TraversalSpec, TraversalSummary};
use crate::traversal::ActionResult;

/// Walks roots under a restriction set and invokes an action per entry.
///
/// # Examples
///
/// ```no_run
/// use pathward::{RestrictionSet, TraversalEngine, TraversalSpec};
///
/// let mut uploads = RestrictionSet::new("uploads");
/// uploads.add_path("/srv/uploads", false).unwrap();
///
/// let spec = TraversalSpec::new(["/srv/uploads"])
///     .with_recurse(true)
///     .with_allowed_extensions(["txt"]);
///
/// let mut seen = Vec::new();
/// let summary = TraversalEngine::new(&uploads)
///     .run(&spec, |path| {
///         seen.push(path.to_path_buf());
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(summary.processed, seen.len());
/// ```
#[derive(Debug, Clone)]
pub struct TraversalEngine<'r> {
    restrictions: &'r RestrictionSet,
    resolver: PathResolver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Files,
    Directories,
}

impl<'r> TraversalEngine<'r> {
    /// Create an engine that authorizes every access against `restrictions`.
    #[must_use]
    pub fn new(restrictions: &'r RestrictionSet) -> Self {
        Self {
            restrictions,
            resolver: PathResolver::new(),
        }
    }

    /// Use a custom resolver (for example a different symlink hop bound).
    #[must_use]
    pub fn with_resolver(mut self, resolver: PathResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Walk `spec` and invoke `action` on every file that passes the filters.
    ///
    /// Directories are descended into but never passed to `action`. A
    /// directory root is always listed; `recurse` decides whether nested
    /// directories are listed too.
    ///
    /// # Errors
    ///
    /// - restriction errors for any root or discovered entry
    /// - `Traversal` when a directory cannot be listed or stat'd
    /// - `SymlinkLoop` when a followed symlink is cyclic
    /// - `Action` when `action` fails and errors are not ignored
    /// - `Filesystem` when a temporary mode cannot be applied or restored
    pub fn run<F>(&self, spec: &TraversalSpec, action: F) -> Result<TraversalSummary>
    where
        F: FnMut(&Path) -> ActionResult,
    {
        self.walk(spec, Mode::Files, action)
    }

    /// Walk `spec` and invoke `action` once per root, and when recursing,
    /// once per nested directory (parents before children).
    ///
    /// Files are never passed to `action` in this mode.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_directories<F>(&self, spec: &TraversalSpec, action: F) -> Result<TraversalSummary>
    where
        F: FnMut(&Path) -> ActionResult,
    {
        self.walk(spec, Mode::Directories, action)
    }

    fn walk<F>(&self, spec: &TraversalSpec, mode: Mode, action: F) -> Result<TraversalSummary>
    where
        F: FnMut(&Path) -> ActionResult,
    {
        let skip = spec
            .skip_prefixes
            .iter()
            .map(|prefix| self.resolver.canonical(prefix))
            .collect::<Result<Vec<_>>>()?;

        // Authorize every root before touching any of them.
        let needs_write = spec.temporary_mode.is_some();
        let mut roots: Vec<PathBuf> = Vec::with_capacity(spec.roots.len());
        for root in &spec.roots {
            let canonical = self.resolver.canonical(root)?;
            self.restrictions.check_canonical(&canonical, false)?;
            if needs_write {
                self.restrictions.check_canonical(&canonical, true)?;
            }
            if !roots.contains(&canonical) {
                roots.push(canonical);
            }
        }

        let mut walk = Walk {
            restrictions: self.restrictions,
            resolver: &self.resolver,
            spec,
            mode,
            skip: &skip,
            visited: HashSet::new(),
            summary: TraversalSummary::default(),
            action,
        };
        for root in &roots {
            walk.visit_root(root)?;
        }

        log::debug!(
            "traversal finished: {} processed, {} skipped, {} action failures",
            walk.summary.processed,
            walk.summary.skipped,
            walk.summary.action_failures
        );
        Ok(walk.summary)
    }
}

/// State for one run.
struct Walk<'a, F> {
    restrictions: &'a RestrictionSet,
    resolver: &'a PathResolver,
    spec: &'a TraversalSpec,
    mode: Mode,
    skip: &'a [PathBuf],
    visited: HashSet<PathBuf>,
    summary: TraversalSummary,
    action: F,
}

impl<F> Walk<'_, F>
where
    F: FnMut(&Path) -> ActionResult,
{
    fn visit_root(&mut self, root: &Path) -> Result<()> {
        if under_skip_prefix(root, self.skip) {
            log::debug!("{} is under a skip prefix", root.display());
            self.summary.skipped += 1;
            return Ok(());
        }

        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("root {} does not exist, skipping", root.display());
                self.summary.skipped += 1;
                return Ok(());
            }
            Err(e) => return Err(traversal_error(root, e)),
        };

        match self.mode {
            _ if metadata.is_dir() => self.walk_tree(root),
            Mode::Files => self.visit_file(root),
            Mode::Directories => self.invoke(root),
        }
    }

    /// Walk a directory root in file-name order.
    fn walk_tree(&mut self, root: &Path) -> Result<()> {
        let max_depth = match (self.mode, self.spec.recurse) {
            (_, true) => usize::MAX,
            (Mode::Files, false) => 1,
            (Mode::Directories, false) => 0,
        };
        let spec = self.spec;
        let skip = self.skip;
        let pruned = Cell::new(0usize);

        let mut entries = WalkDir::new(root)
            .follow_links(spec.follow_symlinks)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let admitted = admit(
                    entry.path(),
                    entry.depth(),
                    entry.path_is_symlink(),
                    spec,
                    skip,
                );
                if !admitted {
                    pruned.set(pruned.get() + 1);
                }
                admitted
            });

        while let Some(next) = entries.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    self.walk_error(err)?;
                    continue;
                }
            };
            // Only directories below `max_depth` were pushed onto the walk.
            let pushed = entry.file_type().is_dir() && entry.depth() < max_depth;

            let Some(target) = self.resolve_entry(&entry)? else {
                continue;
            };
            if target != entry.path() && under_skip_prefix(&target, skip) {
                log::debug!(
                    "{} resolves under a skip prefix ({})",
                    entry.path().display(),
                    target.display()
                );
                self.summary.skipped += 1;
                if pushed {
                    entries.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_dir() {
                if self.mode == Mode::Files {
                    self.visit_file(&target)?;
                }
                continue;
            }

            if pushed && !self.visited.insert(target.clone()) {
                log::debug!("already visited {}", target.display());
                entries.skip_current_dir();
                continue;
            }
            match self.mode {
                Mode::Directories => self.invoke(&target)?,
                Mode::Files if pushed && entry.depth() > 0 => {
                    self.restrictions.check_canonical(&target, false)?;
                }
                Mode::Files => {}
            }
        }

        self.summary.skipped += pruned.get();
        Ok(())
    }

    /// Canonical path of a yielded entry, or `None` for a dead link.
    fn resolve_entry(&mut self, entry: &DirEntry) -> Result<Option<PathBuf>> {
        let path = entry.path();
        if entry.depth() == 0 {
            // Roots arrive canonical.
            return Ok(Some(path.to_path_buf()));
        }
        if entry.path_is_symlink() {
            return match self.resolver.resolve_symlink(path) {
                Ok(target) => Ok(Some(target)),
                Err(Error::BrokenSymlink { .. } | Error::PathNotFound { .. }) => {
                    self.dead(path)?;
                    Ok(None)
                }
                Err(e) => Err(e),
            };
        }
        if self.spec.follow_symlinks {
            // A followed directory link above this entry leaves `path` non-canonical.
            return self.resolver.canonical(path).map(Some);
        }
        Ok(Some(path.to_path_buf()))
    }

    /// Account for an entry the walker could not read.
    fn walk_error(&mut self, err: walkdir::Error) -> Result<()> {
        if let Some(ancestor) = err.loop_ancestor() {
            log::debug!("already visited {}", ancestor.display());
            return Ok(());
        }
        let Some(path) = err.path().map(Path::to_path_buf) else {
            return Err(Error::Io(err.into()));
        };

        let is_symlink = fs::symlink_metadata(&path).is_ok_and(|m| m.file_type().is_symlink());
        if !admit(&path, err.depth(), is_symlink, self.spec, self.skip) {
            self.summary.skipped += 1;
            return Ok(());
        }

        if is_symlink {
            // Re-resolve to report loops and dangling targets precisely.
            return match self.resolver.resolve_symlink(&path) {
                Err(Error::BrokenSymlink { .. } | Error::PathNotFound { .. }) => self.dead(&path),
                Err(e) => Err(e),
                Ok(_) => Err(traversal_error(&path, err.into())),
            };
        }

        let kind = err.io_error().map(std::io::Error::kind);
        match kind {
            Some(ErrorKind::NotFound) => self.dead(&path),
            _ => Err(traversal_error(&path, err.into())),
        }
    }

    fn visit_file(&mut self, file: &Path) -> Result<()> {
        let extension = file
            .extension()
            .and_then(|e| e.to_str())
            .map(normalize_extension)
            .unwrap_or_default();

        // Both lists are consulted; either one may reject the file.
        let mut rejected = false;
        if let Some(allow) = &self.spec.extension_allow {
            if !allow.contains(&extension) {
                log::warn!(
                    "skipping {}: extension '{extension}' is not allowed",
                    file.display()
                );
                rejected = true;
            }
        }
        if let Some(deny) = &self.spec.extension_deny {
            if deny.contains(&extension) {
                log::warn!("skipping {}: extension '{extension}' is denied", file.display());
                rejected = true;
            }
        }
        if rejected {
            self.summary.skipped += 1;
            return Ok(());
        }

        self.invoke(file)
    }

    /// Authorize `path`, run the action on it and account for the result.
    fn invoke(&mut self, path: &Path) -> Result<()> {
        self.restrictions
            .check_canonical(path, self.spec.temporary_mode.is_some())?;

        let outcome = self.call_action(path)?;
        self.summary.processed += 1;

        match outcome {
            Ok(()) => Ok(()),
            Err(source) if self.spec.ignore_action_errors => {
                log::warn!("action failed for {}: {source}", path.display());
                self.summary.action_failures += 1;
                Ok(())
            }
            Err(source) => Err(Error::Action {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn call_action(&mut self, path: &Path) -> Result<ActionResult> {
        let Some(mode) = self.spec.temporary_mode else {
            return Ok((self.action)(path));
        };

        let handle = LocalFile::new(path);
        let guard = TemporaryMode::acquire(&handle, mode)?;
        let outcome = (self.action)(path);
        if outcome.is_ok() {
            guard.restore()?;
        }
        // On failure the guard restores on drop and logs its own errors.
        Ok(outcome)
    }

    fn dead(&mut self, entry: &Path) -> Result<()> {
        log::warn!("{} no longer exists, skipping", entry.display());
        self.summary.skipped += 1;
        Ok(())
    }
}

/// Whether the walker should yield `path` at all.
///
/// Applies the skip list, then the hidden and symlink policies. Roots
/// (depth 0) are filtered before the walk starts.
fn admit(
    path: &Path,
    depth: usize,
    is_symlink: bool,
    spec: &TraversalSpec,
    skip: &[PathBuf],
) -> bool {
    if depth == 0 {
        return true;
    }
    if under_skip_prefix(path, skip) {
        log::debug!("{} is under a skip prefix", path.display());
    } else if !spec.follow_hidden && path.file_name().is_some_and(is_hidden) {
        log::warn!("skipping hidden entry {}", path.display());
    } else if is_symlink && !spec.follow_symlinks {
        log::warn!("skipping symlink {}", path.display());
    } else {
        return true;
    }
    false
}

/// Dot-files, judged on the raw bytes so non-UTF-8 names are covered.
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

fn under_skip_prefix(path: &Path, skip: &[PathBuf]) -> bool {
    PathRelationship::first_containing(path, skip.iter().map(PathBuf::as_path)).is_some()
}

fn traversal_error(path: &Path, source: std::io::Error) -> Error {
    Error::Traversal {
        path: path.to_path_buf(),
        source,
    }
}
