//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for testing the pathward library
//! against real directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use pathward::RestrictionSet;
use tempfile::TempDir;

/// A temporary directory tree with its canonical root.
///
/// The tree is removed when the fixture is dropped.
pub struct TreeFixture {
    _dir: TempDir,
    root: PathBuf,
}

impl TreeFixture {
    /// An empty tree.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        Self { _dir: dir, root }
    }

    /// A small upload area:
    ///
    /// ```text
    /// uploads/photo.JPG
    /// uploads/notes.txt
    /// uploads/.cache/thumb.jpg
    /// uploads/2024/trip.jpg
    /// uploads/2024/raw/trip.cr2
    /// private/secret.txt
    /// ```
    pub fn uploads() -> Self {
        let fixture = Self::new();
        fixture.file("uploads/photo.JPG", "photo");
        fixture.file("uploads/notes.txt", "notes");
        fixture.file("uploads/.cache/thumb.jpg", "t");
        fixture.file("uploads/2024/trip.jpg", "trip");
        fixture.file("uploads/2024/raw/trip.cr2", "raw-bytes");
        fixture.file("private/secret.txt", "secret");
        fixture
    }

    /// Canonical root of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    /// Create a directory and its parents.
    #[allow(dead_code)]
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

/// A single-entry restriction set over `prefix`.
pub fn restrict_to(prefix: &Path, write: bool) -> RestrictionSet {
    let mut set = RestrictionSet::new("test");
    set.add_path(prefix, write).unwrap();
    set
}

/// Paths relative to `root`, with `/` separators, for readable assertions.
#[allow(dead_code)]
pub fn relative_names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
