#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tidypath
//!
//! Immutable, normalized path values with locked and atomic file I/O.
//!
//! A [`PathValue`] is built once, cleaned into a single canonical string and
//! never changes afterwards. Everything else is a method on it: lexical
//! navigation, filesystem queries, locked reads, atomic writes, directory
//! walks and tree removal.
//!
//! ## Core Types
//!
//! - [`PathValue`] and [`path`]: canonical path values
//! - [`PathRelationship`]: lexical containment between two paths
//! - [`Content`] and [`Binmode`]: file contents and how they are decoded
//! - [`DirIterator`]: lazy breadth-first directory walks
//! - [`TempResource`]: temporary files and directories deleted on drop
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Concurrency
//!
//! All I/O is synchronous. Reads take a shared advisory lock and writes an
//! exclusive one, so cooperating processes never see a torn file. Writes
//! through [`PathValue::spew`] go to a sibling temp file that is renamed
//! over the target, so readers see either the old or the new contents.
//!
//! ## Examples
//!
//! ```
//! use tidypath::{path, tempdir, LinesOptions, TempOptions, WriteOptions};
//!
//! // Paths are compared by their canonical form
//! assert_eq!(path(["./a", "b"]).unwrap(), path(["a/b"]).unwrap());
//! assert_eq!(path(["a/b/baz"]).unwrap().parent(2).as_str(), "a");
//!
//! // An empty first component is rejected before anything touches disk
//! assert!(path([""]).unwrap_err().is_invalid_argument());
//!
//! let dir = tempdir(&TempOptions::default()).unwrap();
//! let notes = dir.child(["notes.txt"]);
//! notes.spew("one\ntwo\nthree\n", &WriteOptions::default()).unwrap();
//!
//! let first = notes.lines(&LinesOptions::default().with_count(1).with_chomp(true)).unwrap();
//! assert_eq!(first, vec!["one"]);
//! ```

pub mod config;
pub mod dir;
pub mod error;
pub mod file;
pub mod path;
pub mod stat;
pub mod temp;

// Re-export key types at crate root for convenience
pub use config::{
    AppendOptions, Binmode, IterOptions, LinesOptions, MkpathOptions, ReadOptions, TempOptions,
    TreeOptions, WriteOptions,
};
pub use dir::DirIterator;
pub use error::{Error, Result, TreeFailure};
pub use file::{Content, LockMode, LockedFile};
pub use path::{cwd, path, rootdir, PathRelationship, PathValue};
pub use regex::Regex;
pub use temp::{tempdir, tempfile, TempKind, TempResource};
