//! Existence, type and metadata queries.
//!
//! The boolean probes never fail: anything the OS refuses to answer counts
//! as "no". [`PathValue::stat`] and [`PathValue::lstat`] surface the error.

use std::fs::{self, Metadata};

use crate::error::{Error, Result};
use crate::path::PathValue;

impl PathValue {
    /// Whether anything exists at this path, following symlinks.
    ///
    /// A dangling symlink does not exist.
    #[must_use]
    pub fn exists(&self) -> bool {
        fs::metadata(self.as_std_path()).is_ok()
    }

    /// Whether this path names something that exists and is not a directory.
    ///
    /// Devices, sockets and pipes count as files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        fs::metadata(self.as_std_path()).is_ok_and(|meta| !meta.is_dir())
    }

    /// Whether this path names a directory, following symlinks.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        fs::metadata(self.as_std_path()).is_ok_and(|meta| meta.is_dir())
    }

    /// Whether this path is itself a symlink.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        fs::symlink_metadata(self.as_std_path()).is_ok_and(|meta| meta.file_type().is_symlink())
    }

    /// Metadata for the object this path names, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at the path, and
    /// [`Error::Io`] for any other failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let dir = tidypath::cwd().unwrap();
    /// assert!(dir.stat().unwrap().is_dir());
    /// assert!(path(["no/such/path"]).unwrap().stat().unwrap_err().is_not_found());
    /// ```
    pub fn stat(&self) -> Result<Metadata> {
        fs::metadata(self.as_std_path()).map_err(|e| Error::from_lookup("stat", self, e))
    }

    /// Metadata for this path without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing exists at the path, and
    /// [`Error::Io`] for any other failure.
    pub fn lstat(&self) -> Result<Metadata> {
        fs::symlink_metadata(self.as_std_path()).map_err(|e| Error::from_lookup("lstat", self, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_probes_on_file_and_dir() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let file = base.child(["f.txt"]);
        std::fs::write(file.as_std_path(), b"x").unwrap();

        assert!(file.exists());
        assert!(file.is_file());
        assert!(!file.is_dir());

        assert!(base.exists());
        assert!(base.is_dir());
        assert!(!base.is_file());
    }

    #[test]
    fn test_probes_on_missing_path() {
        let dir = tempdir().unwrap();
        let missing = PathValue::try_from(dir.path()).unwrap().child(["missing"]);

        assert!(!missing.exists());
        assert!(!missing.is_file());
        assert!(!missing.is_dir());
        assert!(!missing.is_symlink());
        assert!(matches!(missing.stat(), Err(Error::NotFound { .. })));
        assert!(matches!(missing.lstat(), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_stat_reports_size() {
        let dir = tempdir().unwrap();
        let file = PathValue::try_from(dir.path()).unwrap().child(["sized"]);
        std::fs::write(file.as_std_path(), b"12345").unwrap();
        assert_eq!(file.stat().unwrap().len(), 5);
    }

    #[test]
    #[cfg(unix)]
    fn test_dangling_symlink() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let link = base.child(["dangling"]);
        std::os::unix::fs::symlink(base.child(["nowhere"]).as_std_path(), link.as_std_path())
            .unwrap();

        assert!(link.is_symlink());
        assert!(!link.exists());
        assert!(link.lstat().unwrap().file_type().is_symlink());
        assert!(link.stat().unwrap_err().is_not_found());
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_to_directory() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let target = base.child(["target"]);
        std::fs::create_dir(target.as_std_path()).unwrap();
        let link = base.child(["link"]);
        std::os::unix::fs::symlink(target.as_std_path(), link.as_std_path()).unwrap();

        assert!(link.is_dir());
        assert!(link.is_symlink());
        assert!(!target.is_symlink());
    }
}
