//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated data directory
//! - A small directory tree to walk

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a run.
const PATHWARD_ENV: [&str; 12] = [
    "PATHWARD_DATA_DIR",
    "PATHWARD_TEMP_ROOT",
    "PATHWARD_DATA_ROOT",
    "PATHWARD_WEB_ROOT",
    "PATHWARD_FOLLOW_SYMLINKS",
    "PATHWARD_FOLLOW_HIDDEN",
    "PATHWARD_EXTENSION_ALLOW",
    "PATHWARD_EXTENSION_DENY",
    "PATHWARD_MOUNT_TABLE",
    "PATHWARD_MAX_SYMLINK_DEPTH",
    "PATHWARD_LOG_MODE",
    "PATHWARD_OUTPUT_FORMAT",
];

/// Test environment with isolated data and working directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Canonical path of the temporary directory
    pub temp_path: PathBuf,
    /// Path to the pathward data directory
    pub data_dir: PathBuf,
    /// Working directory for every command
    pub work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let data_dir = temp_path.join("pathward-data");
        let work_dir = temp_path.join("work");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        Self {
            temp_dir,
            temp_path,
            data_dir,
            work_dir,
        }
    }

    /// A command with no pathward environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathward").expect("Failed to find pathward binary");
        for name in PATHWARD_ENV {
            cmd.env_remove(name);
        }
        cmd.current_dir(&self.work_dir);
        cmd
    }

    /// A command with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory and return its path.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file (and its parents) and return its path.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `pathward.yaml` into the working directory.
    pub fn write_project_config(&self, yaml: &str) {
        std::fs::write(self.work_dir.join("pathward.yaml"), yaml)
            .expect("Failed to write project config");
    }

    /// A small tree under `site/`:
    ///
    /// ```text
    /// site/index.html
    /// site/logo.PNG
    /// site/.env
    /// site/assets/app.js
    /// site/assets/cache/app.js.map
    /// ```
    pub fn site_tree(&self) -> PathBuf {
        self.create_file("site/index.html", "<html></html>");
        self.create_file("site/logo.PNG", "png");
        self.create_file("site/.env", "SECRET=1");
        self.create_file("site/assets/app.js", "js");
        self.create_file("site/assets/cache/app.js.map", "{}");
        self.temp_path.join("site")
    }

    /// Write a mount table file and return its path.
    ///
    /// Targets other than `/` do not exist on the host, so lookups never
    /// depend on host symlinks.
    pub fn mount_table(&self) -> PathBuf {
        self.create_file(
            "mounts",
            "/dev/sda1 / ext4 rw,relatime 0 1\n\
             /dev/sda2 /pathward-test-home ext4 rw,relatime 0 2\n\
             tmpfs /pathward-test-run tmpfs rw,nosuid,nodev 0 0\n\
             //nas/share /pathward-test-mnt/My\\040Share cifs ro 0 0\n",
        )
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines of `stdout` relative to `root`, in output order.
#[allow(dead_code)]
pub fn relative_lines(stdout: &[u8], root: &Path) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            Path::new(line)
                .strip_prefix(root)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| line.to_string())
        })
        .collect()
}
