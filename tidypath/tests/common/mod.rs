//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the tidypath library against a real filesystem.

use tempfile::TempDir;
use tidypath::PathValue;

/// Creates a scratch directory and its path value.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the path is used.
#[allow(dead_code)]
pub fn scratch() -> (TempDir, PathValue) {
    let dir = tempfile::tempdir().unwrap();
    let path = PathValue::try_from(dir.path()).unwrap();
    (dir, path)
}

/// Builder for a directory tree of small files.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let (_dir, root) = TreeFixture::new()
///     .with_file("a/b.txt", "contents")
///     .with_dir("empty")
///     .build();
/// ```
#[allow(dead_code)]
#[derive(Default)]
pub struct TreeFixture {
    files: Vec<(String, String)>,
    dirs: Vec<String>,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file at a `/`-separated path relative to the root.
    pub fn with_file(mut self, relative: &str, contents: &str) -> Self {
        self.files.push((relative.to_string(), contents.to_string()));
        self
    }

    /// Adds an empty directory at a `/`-separated path relative to the root.
    pub fn with_dir(mut self, relative: &str) -> Self {
        self.dirs.push(relative.to_string());
        self
    }

    /// Creates the tree under a fresh scratch directory.
    pub fn build(self) -> (TempDir, PathValue) {
        let (dir, root) = scratch();
        for relative in &self.dirs {
            root.child(relative.split('/'))
                .mkpath(&Default::default())
                .unwrap();
        }
        for (relative, contents) in &self.files {
            let file = root.child(relative.split('/'));
            file.parent(1).mkpath(&Default::default()).unwrap();
            file.spew_raw(contents).unwrap();
        }
        (dir, root)
    }
}
