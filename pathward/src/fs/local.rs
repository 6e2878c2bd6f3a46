//! Local filesystem implementation of [`FileHandle`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::FileHandle;
use crate::restriction::RestrictionSet;

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    /// Wrap a path without any checks.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Wrap a path after authorizing it against `restrictions`.
    ///
    /// The handle keeps the caller's path; the check itself runs on the
    /// canonical form.
    ///
    /// # Errors
    ///
    /// Returns the restriction error if access is denied.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pathward::fs::LocalFile;
    /// use pathward::RestrictionSet;
    ///
    /// let mut uploads = RestrictionSet::new("uploads");
    /// uploads.add_path("/srv/uploads", true).unwrap();
    ///
    /// assert!(LocalFile::open_checked("/srv/uploads/a.png", &uploads, true).is_ok());
    /// assert!(LocalFile::open_checked("/etc/passwd", &uploads, false).is_err());
    /// ```
    pub fn open_checked(
        path: impl Into<PathBuf>,
        restrictions: &RestrictionSet,
        write: bool,
    ) -> Result<Self> {
        let path = path.into();
        restrictions.check(&path, write)?;
        Ok(Self { path })
    }

    fn metadata(&self) -> Result<fs::Metadata> {
        fs::metadata(&self.path).map_err(|e| Error::filesystem(&self.path, e))
    }
}

impl FileHandle for LocalFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn size(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn delete(&self) -> Result<()> {
        let meta = fs::symlink_metadata(&self.path).map_err(|e| Error::filesystem(&self.path, e))?;
        let removed = if meta.is_dir() {
            fs::remove_dir_all(&self.path)
        } else {
            fs::remove_file(&self.path)
        };
        removed.map_err(|e| Error::filesystem(&self.path, e))
    }

    #[cfg(unix)]
    fn mode(&self) -> Result<u32> {
        use std::os::unix::fs::PermissionsExt;
        Ok(self.metadata()?.permissions().mode() & 0o7777)
    }

    #[cfg(not(unix))]
    fn mode(&self) -> Result<u32> {
        Ok(if self.metadata()?.permissions().readonly() {
            0o444
        } else {
            0o644
        })
    }

    #[cfg(unix)]
    fn chmod(&self, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&self.path, fs::Permissions::from_mode(mode & 0o7777))
            .map_err(|e| Error::filesystem(&self.path, e))
    }

    #[cfg(not(unix))]
    fn chmod(&self, mode: u32) -> Result<()> {
        let mut permissions = self.metadata()?.permissions();
        permissions.set_readonly(mode & 0o222 == 0);
        fs::set_permissions(&self.path, permissions).map_err(|e| Error::filesystem(&self.path, e))
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn is_symlink(&self) -> bool {
        fs::symlink_metadata(&self.path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn is_directory(&self) -> bool {
        self.path.is_dir()
    }
}
