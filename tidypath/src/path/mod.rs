//! Immutable path values and the transformations between them.
//!
//! # Key Concepts
//!
//! ## Canonical form
//!
//! Every [`PathValue`] is reduced to a single string form when it is built:
//! - Segments are joined with `/`, the only separator used internally
//! - A leading `~` or `~name` is expanded to a home directory when possible
//! - Duplicate separators, `.` segments and trailing separators are removed
//!
//! Two values are equal exactly when their canonical strings are equal.
//! `..` segments are kept, because resolving them needs the filesystem.
//!
//! ## Resolution
//!
//! [`PathValue::absolute`] and [`PathValue::relative`] work lexically against
//! the current directory. [`PathValue::realpath`] asks the filesystem and
//! fails if the path does not exist.
//!
//! # Examples
//!
//! ```
//! use tidypath::path;
//!
//! let file = path(["foo", "bar.txt"]).unwrap();
//! assert_eq!(file.basename(), "bar.txt");
//! assert_eq!(file.dirname(), "foo/");
//! assert_eq!(file.parent(1).as_str(), "foo");
//!
//! let abs = file.absolute(None).unwrap();
//! assert!(abs.is_absolute());
//! ```
//!
//! # Path Relationships
//!
//! ```
//! use tidypath::{path, PathRelationship};
//!
//! let parent = path(["/home/user"]).unwrap();
//! let child = path(["/home/user/project"]).unwrap();
//!
//! let rel = PathRelationship::between(&parent, &child);
//! assert_eq!(rel, PathRelationship::Ancestor);
//! assert!(parent.subsumes(&child).unwrap());
//! ```

pub mod canonicalize;
pub mod relationship;
pub mod resolver;
pub mod tilde;
mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use relationship::PathRelationship;
pub use resolver::{cwd, rootdir};
pub use value::{path, PathValue};
