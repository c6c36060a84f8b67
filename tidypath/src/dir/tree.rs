//! Creating and removing directory trees.
//!
//! Removal never follows symlinks: a symlink inside a tree is unlinked, and
//! whatever it points at is left alone.

use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{MkpathOptions, TreeOptions};
use crate::error::{Error, Result, TreeFailure};
use crate::path::PathValue;

impl PathValue {
    /// Remove this file or symlink.
    ///
    /// Returns `false` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] for a directory (use
    /// [`PathValue::remove_tree`]) and [`Error::Io`] if the unlink fails.
    pub fn remove(&self) -> Result<bool> {
        match fs::symlink_metadata(self.as_std_path()) {
            Ok(meta) if meta.is_dir() => {
                return Err(Error::NotAFile {
                    path: self.to_path_buf(),
                })
            }
            Ok(meta) => match remove_entry(self.as_std_path(), meta.file_type()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
                Err(e) => return Err(Error::io("unlink", self, e)),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(Error::io("lstat", self, e)),
        }
        log::debug!("removed {self}");
        Ok(true)
    }

    /// Create this directory and any missing parents.
    ///
    /// Returns the directories that were created, outermost first. An
    /// existing directory is not an error and yields an empty list. With
    /// `mode` set, new directories get those permission bits before umask
    /// on Unix; the mode is ignored elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if this path exists as something
    /// else. A failure to create a level is an [`Error::Io`], or an
    /// [`Error::Tree`] listing it in `safe` mode. Levels created before the
    /// failure are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, MkpathOptions, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// let deep = dir.child(["a", "b", "c"]);
    ///
    /// let created = deep.mkpath(&MkpathOptions::default()).unwrap();
    /// assert_eq!(created.len(), 3);
    /// assert!(deep.is_dir());
    /// assert!(deep.mkpath(&MkpathOptions::default()).unwrap().is_empty());
    /// ```
    pub fn mkpath(&self, options: &MkpathOptions) -> Result<Vec<PathValue>> {
        if self.is_dir() {
            return Ok(Vec::new());
        }
        if self.exists() {
            return Err(Error::NotADirectory {
                path: self.to_path_buf(),
            });
        }

        let mut missing: Vec<&Path> = self
            .as_std_path()
            .ancestors()
            .filter(|dir| !dir.as_os_str().is_empty())
            .take_while(|dir| fs::metadata(dir).is_err())
            .collect();
        missing.reverse();

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            if let Some(mode) = options.mode {
                builder.mode(mode);
            }
        }

        let mut created = Vec::with_capacity(missing.len());
        for dir in missing {
            match builder.create(dir) {
                Ok(()) => created.push(PathValue::from_host(dir)?),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {}
                Err(e) if options.safe => {
                    return Err(Error::Tree {
                        path: self.to_path_buf(),
                        failures: vec![TreeFailure {
                            path: dir.to_path_buf(),
                            source: e,
                        }],
                    });
                }
                Err(e) => return Err(Error::io("mkdir", dir, e)),
            }
        }

        log::debug!("created {} directories for {self}", created.len());
        Ok(created)
    }

    /// Remove this path and everything below it.
    ///
    /// Returns the number of entries removed, counting the root. An absent
    /// path removes nothing. A file or symlink is removed on its own. With
    /// `keep_root`, the directory itself is emptied but kept.
    ///
    /// In `safe` mode (the default) every entry is attempted, and failures
    /// are collected into one [`Error::Tree`]. Otherwise the first failure
    /// stops the walk. Either way, whatever was removed stays removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tree`] in `safe` mode and [`Error::Io`] otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, TempOptions, TreeOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// let build = dir.child(["build"]);
    /// build.child(["obj", "main.o"]).touchpath(None).unwrap();
    ///
    /// assert_eq!(build.remove_tree(&TreeOptions::default()).unwrap(), 3);
    /// assert!(!build.exists());
    /// assert_eq!(build.remove_tree(&TreeOptions::default()).unwrap(), 0);
    /// ```
    pub fn remove_tree(&self, options: &TreeOptions) -> Result<usize> {
        let root = self.to_path_buf();
        let meta = match fs::symlink_metadata(&root) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(Error::io("lstat", root, e)),
        };

        if !meta.is_dir() {
            if options.keep_root {
                return Ok(0);
            }
            return match remove_entry(&root, meta.file_type()) {
                Ok(()) => Ok(1),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
                Err(e) => Err(Error::io("unlink", root, e)),
            };
        }

        let mut sweep = Sweep {
            safe: options.safe,
            removed: 0,
            failures: Vec::new(),
        };

        // (directory, children already queued)
        let mut stack = vec![(root.clone(), false)];
        while let Some((dir, expanded)) = stack.pop() {
            if expanded {
                if options.keep_root && dir == root {
                    continue;
                }
                sweep.remove_dir(dir)?;
                continue;
            }

            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    sweep.fail("opendir", dir, e)?;
                    continue;
                }
            };
            stack.push((dir.clone(), true));

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        sweep.fail("readdir", dir.clone(), e)?;
                        continue;
                    }
                };
                let path = entry.path();
                match entry.file_type() {
                    Ok(file_type) if file_type.is_dir() => stack.push((path, false)),
                    Ok(file_type) => sweep.remove_file(path, file_type)?,
                    Err(e) => sweep.fail("lstat", path, e)?,
                }
            }
        }

        log::debug!("removed {} entries under {self}", sweep.removed);
        if sweep.failures.is_empty() {
            Ok(sweep.removed)
        } else {
            Err(Error::Tree {
                path: root,
                failures: sweep.failures,
            })
        }
    }
}

/// Running totals for one `remove_tree` walk.
struct Sweep {
    safe: bool,
    removed: usize,
    failures: Vec<TreeFailure>,
}

impl Sweep {
    fn fail(&mut self, op: &'static str, path: PathBuf, source: io::Error) -> Result<()> {
        if !self.safe {
            return Err(Error::io(op, path, source));
        }
        self.failures.push(TreeFailure { path, source });
        Ok(())
    }

    fn remove_file(&mut self, path: PathBuf, file_type: FileType) -> Result<()> {
        match remove_entry(&path, file_type) {
            Ok(()) => self.removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => self.fail("unlink", path, e)?,
        }
        Ok(())
    }

    fn remove_dir(&mut self, path: PathBuf) -> Result<()> {
        match fs::remove_dir(&path) {
            Ok(()) => self.removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            // already reported through whatever is still inside
            Err(e)
                if e.kind() == io::ErrorKind::DirectoryNotEmpty && !self.failures.is_empty() => {}
            Err(e) => self.fail("rmdir", path, e)?,
        }
        Ok(())
    }
}

/// Unlink a non-directory entry without following it.
fn remove_entry(path: &Path, file_type: FileType) -> io::Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTypeExt;
        if file_type.is_symlink_dir() {
            return fs::remove_dir(path);
        }
    }
    #[cfg(not(windows))]
    let _ = file_type;
    fs::remove_file(path)
}
