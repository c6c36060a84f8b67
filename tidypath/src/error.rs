//! Error types for the tidypath library.
//!
//! This module provides the error hierarchy for all path and file
//! operations, using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Result type alias for operations that may fail with a tidypath error.
///
/// # Examples
///
/// ```
/// use tidypath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tidypath library.
///
/// Every OS-level failure is carried through unchanged inside [`Error::Io`],
/// so callers can still inspect the original error kind and OS code.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input, such as an empty first path component or an
    /// invalid option value.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// A path that must exist does not.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// An underlying OS operation failed.
    #[error("error {op} on '{}': {source}", path.display())]
    Io {
        /// The operation that failed, e.g. `"open"` or `"rename"`.
        op: &'static str,
        /// The path the operation was applied to.
        path: PathBuf,
        /// The original OS error.
        #[source]
        source: io::Error,
    },

    /// Data was not valid UTF-8 under strict UTF-8 mode.
    #[error("invalid UTF-8 for '{}': {source}", path.display())]
    Encoding {
        /// The file being read or written.
        path: PathBuf,
        /// The decoding failure.
        #[source]
        source: Utf8Error,
    },

    /// A file operation was invoked on something that is not a file.
    #[error("not a file: {}", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// A directory operation was invoked on something that is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A chain of symlinks loops back on itself or is too deep to follow.
    #[error("symlink loop detected: {}", path.display())]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
    },

    /// One or more entries failed during a tree operation in safe mode.
    #[error("{} failure(s) under '{}'{}", failures.len(), path.display(), first_failure(failures))]
    Tree {
        /// The root of the tree operation.
        path: PathBuf,
        /// Every entry that could not be processed.
        failures: Vec<TreeFailure>,
    },

    /// An option document could not be parsed.
    #[error("options error: {0}")]
    Options(#[from] serde_yaml::Error),
}

/// A single failed entry from a tree operation.
#[derive(Debug)]
pub struct TreeFailure {
    /// The entry that failed.
    pub path: PathBuf,
    /// The original OS error.
    pub source: io::Error,
}

fn first_failure(failures: &[TreeFailure]) -> String {
    failures
        .first()
        .map(|f| format!(": {}: {}", f.path.display(), f.source))
        .unwrap_or_default()
}

impl Error {
    /// Build an [`Error::Io`] for `op` applied to `path`.
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Build an [`Error::InvalidArgument`].
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Map an OS error to [`Error::NotFound`] when it is one, otherwise to
    /// [`Error::Io`].
    pub(crate) fn from_lookup(
        op: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::io(op, path, source)
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// This is true for [`Error::NotFound`] and for an [`Error::Io`] whose
    /// underlying error kind is `NotFound`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is an invalid argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// The raw OS error code, if this error wraps one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let err = path(["/definitely/not/here/file"]).unwrap().slurp_raw().unwrap_err();
    /// assert!(err.raw_os_error().is_some());
    /// ```
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}
