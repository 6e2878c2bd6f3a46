//! File-handle abstraction.
//!
//! The traversal engine and duplicate resolver depend only on the
//! [`FileHandle`] capability surface, never on a concrete storage backend.
//! [`LocalFile`] is the implementation over the local filesystem, and
//! [`TemporaryMode`] scopes a permission change to the lifetime of a guard.

mod local;
mod permission;

use std::path::Path;

use crate::error::Result;

pub use local::LocalFile;
pub use permission::TemporaryMode;

/// Capabilities the core needs from a file.
///
/// # Examples
///
/// ```no_run
/// use pathward::fs::{FileHandle, LocalFile};
///
/// let file = LocalFile::new("/srv/uploads/report.PDF");
/// assert_eq!(file.extension().as_deref(), Some("pdf"));
/// if file.exists() && !file.is_directory() {
///     println!("{} bytes", file.size().unwrap());
/// }
/// ```
pub trait FileHandle {
    /// The path this handle refers to.
    fn path(&self) -> &Path;

    /// Size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be stat'd.
    fn size(&self) -> Result<u64>;

    /// Lower-cased extension of the final path segment, without the dot.
    ///
    /// Dot-files such as `.profile` have no extension.
    fn extension(&self) -> Option<String> {
        self.path()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Remove the file (directories are removed recursively).
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    fn delete(&self) -> Result<()>;

    /// Current permission bits (`0o7777` mask).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be stat'd.
    fn mode(&self) -> Result<u32>;

    /// Replace the permission bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the permissions cannot be changed.
    fn chmod(&self, mode: u32) -> Result<()>;

    /// Whether the path currently exists (dangling symlinks do not).
    fn exists(&self) -> bool;

    /// Whether the path itself is a symlink.
    fn is_symlink(&self) -> bool;

    /// Whether the path resolves to a directory.
    fn is_directory(&self) -> bool;
}
