//! Lazy directory traversal.
//!
//! [`DirIterator`] reads one directory handle at a time. With `recurse` it
//! walks breadth-first: every entry of a directory is produced before any
//! entry of its subdirectories. Subdirectories wait in a queue as paths and
//! are only opened when their turn comes.
//!
//! Following symlinks while recursing has no cycle detection. A symlink
//! loop makes the iterator infinite; stop consuming it to end the walk.

use std::collections::VecDeque;
use std::fs::{self, DirEntry, ReadDir};
use std::ops::ControlFlow;

use regex::Regex;

use crate::config::IterOptions;
use crate::error::{Error, Result};
use crate::path::PathValue;

/// Lazy sequence of the paths below a directory.
///
/// Each item is a [`Result`]: a failure to read a directory mid-walk is
/// yielded once and ends the iteration. `.` and `..` are never produced.
/// The iterator cannot be rewound; build a fresh one to start again.
#[derive(Debug)]
pub struct DirIterator {
    options: IterOptions,
    current: Option<(PathValue, ReadDir)>,
    pending: VecDeque<PathValue>,
    finished: bool,
}

impl DirIterator {
    /// Open a queued subdirectory, or skip it.
    fn open(&self, dir: PathValue) -> Option<(PathValue, ReadDir)> {
        match fs::read_dir(dir.as_std_path()) {
            Ok(entries) => {
                // it may have been replaced by a symlink since it was queued
                if !self.options.follow_symlinks && dir.is_symlink() {
                    log::debug!("not following symlinked directory {dir}");
                    return None;
                }
                Some((dir, entries))
            }
            Err(e) => {
                log::debug!("skipping unreadable directory {dir}: {e}");
                None
            }
        }
    }
}

impl Iterator for DirIterator {
    type Item = Result<PathValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some((dir, entries)) = self.current.as_mut() else {
                let Some(queued) = self.pending.pop_front() else {
                    self.finished = true;
                    return None;
                };
                self.current = self.open(queued);
                continue;
            };

            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(Error::io("readdir", &*dir, e)));
                }
                None => {
                    self.current = None;
                    continue;
                }
            };

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    return Some(Err(Error::invalid(format!(
                        "entry {} in {dir} is not valid UTF-8",
                        raw.to_string_lossy()
                    ))));
                }
            };
            if name == "." || name == ".." {
                continue;
            }

            let child = dir.child([&name]);
            if self.options.recurse && should_descend(&entry, &child, self.options.follow_symlinks)
            {
                self.pending.push_back(child.clone());
            }
            return Some(Ok(child));
        }
    }
}

/// Whether a directory entry is a directory to walk into.
fn should_descend(entry: &DirEntry, child: &PathValue, follow_symlinks: bool) -> bool {
    match entry.file_type() {
        Ok(file_type) if file_type.is_dir() => true,
        Ok(file_type) => file_type.is_symlink() && follow_symlinks && child.is_dir(),
        Err(_) => false,
    }
}

impl PathValue {
    /// A lazy iterator over the entries below this directory.
    ///
    /// The directory itself is opened now; everything else happens as the
    /// iterator is consumed. Unreadable subdirectories are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if this path is not a directory and
    /// [`Error::Io`] if it cannot be opened.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, IterOptions, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// dir.child(["a", "b.txt"]).touchpath(None).unwrap();
    ///
    /// let all: Vec<_> = dir
    ///     .iterator(&IterOptions::default().with_recurse(true))
    ///     .unwrap()
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(all, vec![dir.child(["a"]), dir.child(["a", "b.txt"])]);
    /// ```
    pub fn iterator(&self, options: &IterOptions) -> Result<DirIterator> {
        if !self.is_dir() {
            return Err(Error::NotADirectory {
                path: self.to_path_buf(),
            });
        }
        let entries =
            fs::read_dir(self.as_std_path()).map_err(|e| Error::io("opendir", self, e))?;

        Ok(DirIterator {
            options: *options,
            current: Some((self.clone(), entries)),
            pending: VecDeque::new(),
            finished: false,
        })
    }

    /// The entries directly below this directory, sorted.
    ///
    /// With a `filter`, only entries whose basename matches it are kept.
    ///
    /// # Errors
    ///
    /// See [`PathValue::iterator`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, Regex, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// for name in ["b.rs", "a.rs", "notes.md"] {
    ///     dir.child([name]).touch(None).unwrap();
    /// }
    ///
    /// let sources = dir.children(Some(&Regex::new(r"\.rs$").unwrap())).unwrap();
    /// assert_eq!(sources, vec![dir.child(["a.rs"]), dir.child(["b.rs"])]);
    /// ```
    pub fn children(&self, filter: Option<&Regex>) -> Result<Vec<PathValue>> {
        let mut children = Vec::new();
        for child in self.iterator(&IterOptions::default())? {
            let child = child?;
            if filter.is_none_or(|re| re.is_match(child.basename())) {
                children.push(child);
            }
        }
        children.sort();
        Ok(children)
    }

    /// Call `callback` for each entry the iterator produces.
    ///
    /// The walk stops early when the callback returns
    /// [`ControlFlow::Break`], and the break value is returned.
    ///
    /// # Errors
    ///
    /// See [`PathValue::iterator`]. A failure mid-walk stops the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::ControlFlow;
    /// use tidypath::{tempdir, IterOptions, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// dir.child(["deep", "needle.txt"]).touchpath(None).unwrap();
    ///
    /// let found = dir
    ///     .visit(
    ///         |path| {
    ///             if path.basename() == "needle.txt" {
    ///                 ControlFlow::Break(path.clone())
    ///             } else {
    ///                 ControlFlow::Continue(())
    ///             }
    ///         },
    ///         &IterOptions::default().with_recurse(true),
    ///     )
    ///     .unwrap();
    /// assert_eq!(found, Some(dir.child(["deep", "needle.txt"])));
    /// ```
    pub fn visit<B, F>(&self, mut callback: F, options: &IterOptions) -> Result<Option<B>>
    where
        F: FnMut(&PathValue) -> ControlFlow<B>,
    {
        for entry in self.iterator(options)? {
            if let ControlFlow::Break(value) = callback(&entry?) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
