//! Where mount-table text comes from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default location of the live kernel mount table.
pub const PROC_MOUNTS: &str = "/proc/mounts";

/// A line-oriented mount-table text feed.
pub trait MountSource {
    /// Read the full current text of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be read.
    fn read_mount_table(&self) -> Result<String>;
}

/// Reads the kernel mount table from a file, `/proc/mounts` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcMounts {
    path: PathBuf,
}

impl Default for ProcMounts {
    fn default() -> Self {
        Self {
            path: PathBuf::from(PROC_MOUNTS),
        }
    }
}

impl ProcMounts {
    /// Read from `/proc/mounts`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from another file in the same format.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MountSource for ProcMounts {
    fn read_mount_table(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| Error::filesystem(&self.path, e))
    }
}

/// Fixed mount-table text held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMountSource {
    text: String,
}

impl StaticMountSource {
    /// Wrap `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replace the text returned by later reads.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl MountSource for StaticMountSource {
    fn read_mount_table(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
