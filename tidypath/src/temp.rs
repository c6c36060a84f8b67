//! Scoped temporary files and directories.
//!
//! A [`TempResource`] owns the object it names. The object is deleted
//! exactly once: by [`TempResource::release`], or when the resource is
//! dropped. Paths cloned out of it are plain values and never delete
//! anything.

use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::Path;

use ::tempfile::{Builder, TempDir, TempPath};

use crate::config::{EnvironmentConfig, OptionsValidator, TempOptions};
use crate::error::{Error, Result};
use crate::path::{cwd, PathValue};

/// Template used when none is given.
pub const DEFAULT_TEMPLATE: &str = "XXXXXXXXXX";

/// A temporary file or directory, deleted when this value goes away.
///
/// Dereferences to the [`PathValue`] naming it, so every path operation is
/// available directly.
///
/// # Examples
///
/// ```
/// use tidypath::{tempdir, TempKind, TempOptions};
///
/// let dir = tempdir(&TempOptions::default()).unwrap();
/// let kept = dir.to_path_buf();
/// assert_eq!(dir.kind(), TempKind::Dir);
/// assert!(dir.is_dir());
///
/// drop(dir);
/// assert!(!kept.exists());
/// ```
#[derive(Debug)]
pub struct TempResource {
    path: PathValue,
    handle: TempHandle,
}

#[derive(Debug)]
enum TempHandle {
    File(TempPath),
    Dir(TempDir),
}

/// The kind of object a [`TempResource`] was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempKind {
    /// A regular file from [`tempfile`].
    File,
    /// A directory from [`tempdir`].
    Dir,
}

/// Create a temporary file.
///
/// The file is created empty, in `dir` if given, else in the system temp
/// directory when `tmpdir` is set, else in the current directory. The name
/// is the template with its trailing `X` characters randomized, followed by
/// the suffix. The returned path is always absolute.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for a bad template or suffix, and
/// [`Error::Io`] if the file cannot be created.
///
/// # Examples
///
/// ```
/// use tidypath::{tempfile, TempOptions};
///
/// let temp = tempfile(&TempOptions::default().with_template("report-XXXXXX").with_suffix(".csv"))
///     .unwrap();
/// assert!(temp.is_absolute());
/// assert!(temp.basename().starts_with("report-"));
/// assert!(temp.basename().ends_with(".csv"));
/// ```
pub fn tempfile(options: &TempOptions) -> Result<TempResource> {
    let (builder, dir) = prepare(options)?;
    let file = builder
        .tempfile_in(dir.as_std_path())
        .map_err(|e| Error::io("create", &dir, e))?;
    let temp = file.into_temp_path();

    let path = finish(&temp, options)?;
    log::debug!("created temp file {path}");
    Ok(TempResource {
        path,
        handle: TempHandle::File(temp),
    })
}

/// Create a temporary directory.
///
/// Placement and naming follow [`tempfile()`]. The directory and everything
/// inside it are removed with the resource.
///
/// # Errors
///
/// See [`tempfile()`].
pub fn tempdir(options: &TempOptions) -> Result<TempResource> {
    let (builder, dir) = prepare(options)?;
    let temp = builder
        .tempdir_in(dir.as_std_path())
        .map_err(|e| Error::io("mkdir", &dir, e))?;

    let path = finish(temp.path(), options)?;
    log::debug!("created temp directory {path}");
    Ok(TempResource {
        path,
        handle: TempHandle::Dir(temp),
    })
}

/// Validate the options and build the name generator and parent directory.
fn prepare(options: &TempOptions) -> Result<(Builder<'_, '_>, PathValue)> {
    OptionsValidator::validate_temp(options)?;

    let template = options.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let prefix = template.trim_end_matches('X');
    let random = template.len() - prefix.len();

    let mut builder = Builder::new();
    builder
        .prefix(prefix)
        .suffix(options.suffix.as_deref().unwrap_or(""))
        .rand_bytes(random);

    let dir = match options.dir {
        Some(ref dir) => dir.absolute(None)?,
        None if options.tmpdir => EnvironmentConfig::temp_root()?,
        None => cwd()?,
    };
    Ok((builder, dir))
}

/// The path handed back to the caller for a freshly created object.
fn finish(created: &Path, options: &TempOptions) -> Result<PathValue> {
    let path = PathValue::from_host(created)?;
    if options.realpath {
        path.realpath()
    } else {
        path.absolute(None)
    }
}

impl TempResource {
    /// The path of the temporary object.
    #[must_use]
    pub fn path(&self) -> &PathValue {
        &self.path
    }

    /// What kind of object was created.
    ///
    /// This is fixed at creation. Use [`PathValue::is_dir`] through the
    /// deref to ask what is on disk now.
    #[must_use]
    pub fn kind(&self) -> TempKind {
        match self.handle {
            TempHandle::File(_) => TempKind::File,
            TempHandle::Dir(_) => TempKind::Dir,
        }
    }

    /// Delete the temporary object now.
    ///
    /// An object that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the object exists but cannot be removed.
    /// It is not retried on drop.
    pub fn release(self) -> Result<()> {
        let TempResource { path, handle } = self;
        let outcome = match handle {
            TempHandle::File(temp) => temp.close(),
            TempHandle::Dir(temp) => temp.close(),
        };
        match outcome {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io("unlink", &path, e)),
        }
        log::debug!("released temp resource {path}");
        Ok(())
    }
}

impl Deref for TempResource {
    type Target = PathValue;

    fn deref(&self) -> &PathValue {
        &self.path
    }
}

impl AsRef<Path> for TempResource {
    fn as_ref(&self) -> &Path {
        self.path.as_std_path()
    }
}

impl AsRef<PathValue> for TempResource {
    fn as_ref(&self) -> &PathValue {
        &self.path
    }
}

impl fmt::Display for TempResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)
    }
}
