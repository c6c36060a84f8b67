//! Process environment lookups.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::Result;
use crate::path::PathValue;

/// Environment variable naming the temp directory.
pub const TMPDIR_VAR: &str = "TMPDIR";

/// Reads the process environment.
///
/// # Examples
///
/// ```
/// use tidypath::config::EnvironmentConfig;
///
/// let root = EnvironmentConfig::temp_root().unwrap();
/// assert!(root.is_absolute());
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// The directory temp resources are created in by default.
    ///
    /// A non-empty `TMPDIR` wins; otherwise the host default is used. A
    /// relative value is made absolute against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the directory is not valid UTF-8, or an I/O error if the current
    /// directory is needed and cannot be read.
    pub fn temp_root() -> Result<PathValue> {
        Self::temp_root_from(env::var_os(TMPDIR_VAR))
    }

    /// Resolve the temp root from an explicit `TMPDIR` value.
    fn temp_root_from(tmpdir: Option<OsString>) -> Result<PathValue> {
        let dir: PathBuf = match tmpdir {
            Some(value) if !value.is_empty() => value.into(),
            _ => host_temp_dir(),
        };
        PathValue::try_from(dir)?.absolute(None)
    }
}

/// The platform temp directory, ignoring `TMPDIR`.
#[cfg(unix)]
fn host_temp_dir() -> PathBuf {
    // std would read an empty TMPDIR back as an empty path
    PathBuf::from("/tmp")
}

#[cfg(not(unix))]
fn host_temp_dir() -> PathBuf {
    env::temp_dir()
}
