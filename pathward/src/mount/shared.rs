//! A mount table shared between threads.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::mount::source::MountSource;
use crate::mount::table::MountTable;

/// Holds the current [`MountTable`] snapshot and replaces it on refresh.
///
/// Readers take an `Arc` to a whole snapshot, so they never observe indexes
/// from two different refreshes. A refresh parses the new table completely
/// before swapping it in; if parsing fails the previous snapshot stays.
///
/// # Examples
///
/// ```
/// use pathward::mount::{SharedMountTable, StaticMountSource};
///
/// let mut source = StaticMountSource::new("/dev/sda1 / ext4 rw 0 1\n");
/// let shared = SharedMountTable::load(&source).unwrap();
///
/// source.set_text("/dev/sda1 / ext4 ro 0 1\n");
/// shared.refresh(&source).unwrap();
/// assert!(shared.snapshot().lookup_by_target("/").unwrap().is_read_only());
/// ```
#[derive(Debug, Default)]
pub struct SharedMountTable {
    current: RwLock<Arc<MountTable>>,
}

impl SharedMountTable {
    /// Start from an existing snapshot.
    #[must_use]
    pub fn new(table: MountTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Build the first snapshot from `source`.
    ///
    /// # Errors
    ///
    /// Returns the read or parse error.
    pub fn load(source: &dyn MountSource) -> Result<Self> {
        Ok(Self::new(MountTable::refresh(source)?))
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MountTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Re-read `source` and publish the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns the read or parse error; the previous snapshot is kept.
    pub fn refresh(&self, source: &dyn MountSource) -> Result<Arc<MountTable>> {
        let fresh = Arc::new(MountTable::refresh(source)?);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&fresh);
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::StaticMountSource;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut source = StaticMountSource::new("/dev/sda1 / ext4 rw 0 1\n");
        let shared = SharedMountTable::load(&source).unwrap();

        source.set_text("/dev/sda1 / ext4 rw 0 1\ngarbage\n");
        assert!(shared.refresh(&source).is_err());

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.lookup_by_target("/").unwrap().source, "/dev/sda1");
    }

    #[test]
    fn test_old_snapshots_stay_valid() {
        let mut source = StaticMountSource::new("/dev/sda1 / ext4 rw 0 1\n");
        let shared = SharedMountTable::load(&source).unwrap();
        let before = shared.snapshot();

        source.set_text("/dev/sdb1 / xfs rw 0 1\n");
        shared.refresh(&source).unwrap();

        assert_eq!(before.lookup_by_target("/").unwrap().source, "/dev/sda1");
        assert_eq!(shared.snapshot().lookup_by_target("/").unwrap().source, "/dev/sdb1");
    }

    #[test]
    fn test_readers_see_consistent_snapshots() {
        let tables = [
            StaticMountSource::new("/dev/a /pathward-shared ext4 rw 0 0\n/dev/a /pathward-shared-2 ext4 rw 0 0\n"),
            StaticMountSource::new("/dev/b /pathward-shared xfs ro 0 0\n"),
        ];
        let shared = Arc::new(SharedMountTable::load(&tables[0]).unwrap());
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Relaxed) {
                        let snapshot = shared.snapshot();
                        for entry in snapshot.entries() {
                            let by_source = snapshot.lookup_by_source(&entry.source);
                            assert!(by_source.iter().any(|e| **e == *entry));
                        }
                        let visible = snapshot.lookup_by_target("/pathward-shared").unwrap();
                        assert_eq!(snapshot.lookup_by_source(&visible.source).len(), snapshot.len());
                    }
                })
            })
            .collect();

        for i in 0..200 {
            shared.refresh(&tables[i % 2]).unwrap();
        }
        done.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
