//! Duplicate-file resolution.
//!
//! Grouping files by content is somebody else's job. This module takes the
//! groups as given, keeps the first member of each (discovery order) and
//! deletes the rest, reporting how much was reclaimed.

use serde::Serialize;

use crate::error::Result;
use crate::fs::FileHandle;
use crate::restriction::RestrictionSet;

/// Files considered equivalent, in discovery order. The first is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<H> {
    /// Group members; index 0 is the keeper.
    pub members: Vec<H>,
}

impl<H> DuplicateGroup<H> {
    /// Create a group from members in discovery order.
    #[must_use]
    pub fn new(members: Vec<H>) -> Self {
        Self { members }
    }

    /// The member that survives resolution, if any.
    #[must_use]
    pub fn keeper(&self) -> Option<&H> {
        self.members.first()
    }
}

impl<H> FromIterator<H> for DuplicateGroup<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Totals from one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateOutcome<H> {
    /// Number of files deleted.
    pub deleted_count: usize,
    /// Sum of the sizes of deleted files, read before each deletion.
    pub deleted_bytes: u64,
    /// The deleted files, in deletion order.
    pub deleted_files: Vec<H>,
}

impl<H> Default for DuplicateOutcome<H> {
    fn default() -> Self {
        Self {
            deleted_count: 0,
            deleted_bytes: 0,
            deleted_files: Vec::new(),
        }
    }
}

/// Deletes all but the first member of each duplicate group.
///
/// # Examples
///
/// ```no_run
/// use pathward::dedup::{DuplicateGroup, DuplicateResolver};
/// use pathward::fs::LocalFile;
///
/// let group: DuplicateGroup<LocalFile> = ["/srv/a.jpg", "/srv/copy/a.jpg"]
///     .into_iter()
///     .map(LocalFile::new)
///     .collect();
///
/// let outcome = DuplicateResolver::new().delete_keeping_first([group]).unwrap();
/// println!("reclaimed {} bytes", outcome.deleted_bytes);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateResolver<'r> {
    restrictions: Option<&'r RestrictionSet>,
}

impl<'r> DuplicateResolver<'r> {
    /// A resolver that trusts its input: members are assumed to have been
    /// authorized already.
    #[must_use]
    pub fn new() -> Self {
        Self { restrictions: None }
    }

    /// A resolver that checks each member for write access before deleting it.
    #[must_use]
    pub fn with_restrictions(restrictions: &'r RestrictionSet) -> Self {
        Self {
            restrictions: Some(restrictions),
        }
    }

    /// Keep the first member of every group and delete the others.
    ///
    /// Groups are consumed lazily. Empty and single-member groups delete
    /// nothing.
    ///
    /// # Errors
    ///
    /// The first failure (restriction, size lookup or deletion) stops the
    /// pass and is returned; files deleted before it stay deleted.
    pub fn delete_keeping_first<H, I>(&self, groups: I) -> Result<DuplicateOutcome<H>>
    where
        H: FileHandle,
        I: IntoIterator<Item = DuplicateGroup<H>>,
    {
        let mut outcome = DuplicateOutcome::default();

        for group in groups {
            let mut members = group.members.into_iter();
            let Some(keeper) = members.next() else {
                continue;
            };

            for duplicate in members {
                if let Some(restrictions) = self.restrictions {
                    restrictions.check_write(duplicate.path())?;
                }
                let size = duplicate.size()?;
                duplicate.delete()?;
                log::debug!(
                    "deleted {} ({size} bytes), kept {}",
                    duplicate.path().display(),
                    keeper.path().display()
                );

                outcome.deleted_count += 1;
                outcome.deleted_bytes += size;
                outcome.deleted_files.push(duplicate);
            }
        }

        Ok(outcome)
    }
}
