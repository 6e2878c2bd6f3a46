//! Scoped permission changes.

use crate::error::Result;
use crate::fs::FileHandle;

/// Applies a temporary permission mode and restores the original on drop.
///
/// Restoration happens on every exit path: call [`TemporaryMode::restore`]
/// to observe a restore failure, or let the guard drop (for example while
/// an error propagates) and the failure is logged instead.
///
/// # Examples
///
/// ```no_run
/// use pathward::fs::{FileHandle, LocalFile, TemporaryMode};
///
/// let file = LocalFile::new("/srv/uploads/locked.bin");
/// let guard = TemporaryMode::acquire(&file, 0o600).unwrap();
/// // ... work with the file while it is 0o600 ...
/// guard.restore().unwrap();
/// ```
#[derive(Debug)]
pub struct TemporaryMode<'a, H: FileHandle + ?Sized> {
    handle: &'a H,
    original: u32,
    active: bool,
}

impl<'a, H: FileHandle + ?Sized> TemporaryMode<'a, H> {
    /// Capture the current mode of `handle` and switch it to `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the current mode cannot be read or the new one
    /// cannot be applied. Nothing needs restoring in either case.
    pub fn acquire(handle: &'a H, mode: u32) -> Result<Self> {
        let original = handle.mode()?;
        handle.chmod(mode)?;
        Ok(Self {
            handle,
            original,
            active: true,
        })
    }

    /// The mode that will be restored.
    #[must_use]
    pub fn original(&self) -> u32 {
        self.original
    }

    /// Restore the original mode now.
    ///
    /// # Errors
    ///
    /// Returns an error if the original mode cannot be re-applied.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        self.handle.chmod(self.original)
    }
}

impl<H: FileHandle + ?Sized> Drop for TemporaryMode<'_, H> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.handle.chmod(self.original) {
                log::warn!(
                    "failed to restore mode {:o} on {}: {e}",
                    self.original,
                    self.handle.path().display()
                );
            }
        }
    }
}
