//! Advisory file locks held for the span of one operation.
//!
//! Locks are whole-file and advisory: only processes that also lock see
//! them. A lock is released when its guard drops, on every exit path.

use std::fs::File;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Kind of advisory lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Many readers may hold the lock at once.
    Shared,
    /// A single writer holds the lock.
    Exclusive,
}

/// An open file holding an advisory lock.
///
/// Blocks until the lock is granted. The lock is released on drop.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl LockedFile {
    /// Lock `file`, which was opened from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the lock cannot be taken. A failure to lock
    /// is always reported, never ignored.
    pub fn acquire(file: File, path: impl Into<PathBuf>, mode: LockMode) -> Result<Self> {
        let path = path.into();
        let locked = match mode {
            LockMode::Shared => file.lock_shared(),
            LockMode::Exclusive => file.lock(),
        };
        locked.map_err(|e| Error::io("lock", path.clone(), e))?;

        Ok(Self { file, path, mode })
    }

    /// The mode the lock was taken in.
    #[must_use]
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Deref for LockedFile {
    type Target = File;

    fn deref(&self) -> &File {
        &self.file
    }
}

impl DerefMut for LockedFile {
    fn deref_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        // closing the handle releases it too
        if let Err(e) = self.file.unlock() {
            log::trace!("unlocking {} failed: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::io::{Read, Write};
    use tempfile::tempdir;

    #[test]
    fn test_exclusive_lock_allows_io() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.txt");
        let file = File::create(&path).unwrap();

        let mut locked = LockedFile::acquire(file, &path, LockMode::Exclusive).unwrap();
        assert_eq!(locked.mode(), LockMode::Exclusive);
        locked.write_all(b"data").unwrap();
        drop(locked);

        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_shared_locks_coexist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        std::fs::write(&path, b"abc").unwrap();

        let first =
            LockedFile::acquire(File::open(&path).unwrap(), &path, LockMode::Shared).unwrap();
        let mut second =
            LockedFile::acquire(File::open(&path).unwrap(), &path, LockMode::Shared).unwrap();

        let mut buf = String::new();
        second.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "abc");
        drop(first);
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("release.txt");
        std::fs::write(&path, b"").unwrap();

        let open = || OpenOptions::new().write(true).open(&path).unwrap();
        let held = LockedFile::acquire(open(), &path, LockMode::Exclusive).unwrap();
        assert!(open().try_lock().is_err());
        drop(held);
        assert!(open().try_lock().is_ok());
    }
}
