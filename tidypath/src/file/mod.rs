//! File contents: locked reads, atomic writes, appends and encodings.
//!
//! All operations here are methods on [`PathValue`](crate::PathValue) and
//! block until the OS call completes. Coordination with other processes is
//! through advisory locks only:
//!
//! | operation | lock | on the |
//! |---|---|---|
//! | `slurp`, `lines` | shared | target file |
//! | `spew`, `edit` | exclusive | temp file renamed over the target |
//! | `append` | exclusive | target file |
//!
//! Operations on files fail fast with [`Error::NotAFile`](crate::Error::NotAFile)
//! when the path is a directory.

pub mod encoding;
pub mod lock;
mod read;
mod transfer;
mod write;

pub use encoding::Content;
pub use lock::{LockMode, LockedFile};
