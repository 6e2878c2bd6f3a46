//! Mount-table snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::mount::entry::MountEntry;
use crate::mount::source::MountSource;
use crate::path::canonicalize::canonical_path;
use crate::path::PathRelationship;

/// An immutable snapshot of mount state with source and target indexes.
///
/// Both indexes share the same `Arc<MountEntry>` values and are built
/// together, so a snapshot is always internally consistent. To observe new
/// kernel state, build a new snapshot with [`MountTable::refresh`].
///
/// # Examples
///
/// ```
/// use pathward::mount::MountTable;
///
/// let table = MountTable::parse("/dev/sda1 / ext4 rw 0 1\n").unwrap();
/// let root = table.lookup_by_target("/").unwrap();
/// assert_eq!(root.source, "/dev/sda1");
/// assert_eq!(root.pass_number, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    entries: Vec<Arc<MountEntry>>,
    by_source: HashMap<String, Vec<Arc<MountEntry>>>,
    by_target: HashMap<PathBuf, Arc<MountEntry>>,
}

impl MountTable {
    /// Parse mount-table text, one mount per line. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMountTable` for the first bad line; no partial
    /// table is ever produced.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::default();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = Arc::new(MountEntry::parse_line(line, index + 1)?);

            table
                .by_source
                .entry(entry.source.clone())
                .or_default()
                .push(Arc::clone(&entry));
            // Later rows are mounted on top of earlier ones.
            table
                .by_target
                .insert(entry.target.clone(), Arc::clone(&entry));
            table.entries.push(entry);
        }

        log::debug!("parsed mount table with {} entries", table.entries.len());
        Ok(table)
    }

    /// Read `source` and parse it into a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns the source's read error or the parse error.
    pub fn refresh(source: &dyn MountSource) -> Result<Self> {
        let text = source.read_mount_table()?;
        Self::parse(&text)
    }

    /// The mount whose target is exactly `directory` (after canonicalizing).
    ///
    /// When several rows share a target, the last one (the mount currently
    /// visible) is returned.
    ///
    /// # Errors
    ///
    /// Returns `NotMounted` if no row has that target, or the
    /// canonicalization error for an invalid path.
    pub fn lookup_by_target(&self, directory: impl AsRef<Path>) -> Result<&MountEntry> {
        let canonical = canonical_path(directory.as_ref())?;
        self.by_target
            .get(&canonical)
            .map(|entry| &**entry)
            .ok_or(Error::NotMounted { path: canonical })
    }

    /// Every row mounted from `source`, in table order.
    #[must_use]
    pub fn lookup_by_source(&self, source: &str) -> &[Arc<MountEntry>] {
        self.by_source.get(source).map(Vec::as_slice).unwrap_or_default()
    }

    /// The mount that holds `path`: the visible mount with the longest
    /// target containing the canonical path.
    ///
    /// # Errors
    ///
    /// Returns `NotMounted` if no target contains the path (only possible
    /// for tables without a root mount).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathward::mount::MountTable;
    ///
    /// let table = MountTable::parse(
    ///     "/dev/sda1 / ext4 rw 0 1\n/dev/sda2 /nonexistent-home ext4 rw 0 2\n",
    /// )
    /// .unwrap();
    /// let entry = table.containing_mount("/nonexistent-home/alice/notes.txt").unwrap();
    /// assert_eq!(entry.source, "/dev/sda2");
    /// ```
    pub fn containing_mount(&self, path: impl AsRef<Path>) -> Result<&MountEntry> {
        let canonical = canonical_path(path.as_ref())?;
        self.by_target
            .values()
            .filter(|entry| PathRelationship::is_within(&canonical, &entry.target))
            .max_by_key(|entry| entry.target.components().count())
            .map(|entry| &**entry)
            .ok_or(Error::NotMounted { path: canonical })
    }

    /// All rows in table order.
    pub fn entries(&self) -> impl Iterator<Item = &MountEntry> {
        self.entries.iter().map(|entry| &**entry)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
