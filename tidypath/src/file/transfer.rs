//! Copying and moving files.

use std::fs;

use crate::error::{Error, Result};
use crate::path::PathValue;

impl PathValue {
    /// Copy this file to `dest`.
    ///
    /// If `dest` is an existing directory the copy is placed inside it under
    /// the same basename. Returns the path of the copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] if this path is not an existing file, and
    /// [`Error::Io`] if the copy fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// let source = dir.child(["a.txt"]);
    /// source.spew_raw("data").unwrap();
    ///
    /// let sub = dir.child(["sub"]);
    /// sub.mkpath(&Default::default()).unwrap();
    ///
    /// let copy = source.copy(&sub).unwrap();
    /// assert_eq!(copy, sub.child(["a.txt"]));
    /// assert_eq!(copy.slurp_raw().unwrap(), b"data");
    /// ```
    pub fn copy(&self, dest: &PathValue) -> Result<PathValue> {
        if !self.is_file() {
            return Err(Error::NotAFile {
                path: self.to_path_buf(),
            });
        }

        let dest = if dest.is_dir() {
            dest.child([self.basename()])
        } else {
            dest.clone()
        };
        fs::copy(self.as_std_path(), dest.as_std_path()).map_err(|e| Error::io("copy", &dest, e))?;

        log::debug!("copied {self} to {dest}");
        Ok(dest)
    }

    /// Rename this path to `dest`.
    ///
    /// This is a single rename, so it does not cross filesystems. Returns
    /// the new path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the rename fails.
    pub fn move_to(&self, dest: &PathValue) -> Result<PathValue> {
        fs::rename(self.as_std_path(), dest.as_std_path())
            .map_err(|e| Error::io("rename", self, e))?;

        log::debug!("moved {self} to {dest}");
        Ok(dest.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_copy_to_file_path() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let source = base.child(["src.txt"]);
        source.spew_raw(b"payload").unwrap();

        let dest = base.child(["dst.txt"]);
        assert_eq!(source.copy(&dest).unwrap(), dest);
        assert_eq!(dest.slurp_raw().unwrap(), b"payload");
        assert!(source.exists());
    }

    #[test]
    fn test_copy_overwrites() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let source = base.child(["src.txt"]);
        let dest = base.child(["dst.txt"]);
        source.spew_raw(b"new").unwrap();
        dest.spew_raw(b"old and longer").unwrap();

        source.copy(&dest).unwrap();
        assert_eq!(dest.slurp_raw().unwrap(), b"new");
    }

    #[test]
    fn test_copy_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let err = base.copy(&base.child(["x"])).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
    }

    #[test]
    fn test_copy_missing_source() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let err = base.child(["absent"]).copy(&base.child(["x"])).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
    }

    #[test]
    fn test_move_to() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let source = base.child(["before"]);
        source.spew_raw(b"x").unwrap();

        let moved = source.move_to(&base.child(["after"])).unwrap();
        assert!(!source.exists());
        assert_eq!(moved.slurp_raw().unwrap(), b"x");
    }

    #[test]
    fn test_move_missing_fails() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        let err = base.child(["absent"]).move_to(&base.child(["x"])).unwrap_err();
        assert!(err.is_not_found());
    }
}
