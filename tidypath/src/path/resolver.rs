//! Transformations that consult the operating system.
//!
//! [`PathValue::absolute`] and [`PathValue::relative`] only read the current
//! directory. [`PathValue::realpath`] asks the filesystem to resolve every
//! symlink and `..` segment; it is not atomic with respect to concurrent
//! changes to the tree it walks.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::value::PathValue;

/// Upper bound on symlink hops when resolving a write target.
const MAX_SYMLINK_DEPTH: usize = 100;

/// The current working directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be read (for example, it
/// was deleted), or [`Error::InvalidArgument`] if it is not valid UTF-8.
///
/// # Examples
///
/// ```
/// let cwd = tidypath::cwd().unwrap();
/// assert!(cwd.is_absolute());
/// ```
pub fn cwd() -> Result<PathValue> {
    let dir = std::env::current_dir().map_err(|e| Error::io("getcwd", ".", e))?;
    PathValue::from_host(&dir)
}

/// The root directory.
///
/// On Windows this is the root of the current directory's volume.
///
/// # Errors
///
/// Only fails on platforms with volumes, when the current directory
/// cannot be read.
#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
pub fn rootdir() -> Result<PathValue> {
    Ok(PathValue::from_canonical("/".to_string()))
}

/// The root directory.
///
/// On Windows this is the root of the current directory's volume.
///
/// # Errors
///
/// Only fails on platforms with volumes, when the current directory
/// cannot be read.
#[cfg(windows)]
pub fn rootdir() -> Result<PathValue> {
    let cwd = cwd()?;
    Ok(PathValue::from_canonical(format!("{}/", cwd.volume())))
}

impl PathValue {
    /// This path in absolute form.
    ///
    /// An absolute path is returned unchanged. A relative path is joined
    /// onto `base`, or onto the current directory when `base` is `None`. A
    /// relative `base` is itself made absolute first. Symlinks and `..` are
    /// left alone; use [`PathValue::realpath`] for that.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is needed and cannot be
    /// read.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// # #[cfg(unix)] {
    /// let base = path(["/srv"]).unwrap();
    /// let abs = path(["www/../app"]).unwrap().absolute(Some(&base)).unwrap();
    /// assert_eq!(abs.as_str(), "/srv/www/../app");
    /// # }
    /// ```
    pub fn absolute(&self, base: Option<&PathValue>) -> Result<PathValue> {
        if self.is_absolute() {
            return Ok(self.clone());
        }
        let base = match base {
            Some(base) if base.is_absolute() => base.clone(),
            Some(base) => base.absolute(None)?,
            None => cwd()?,
        };
        join_onto(&base, self)
    }

    /// The real path, with every symlink and `..` segment resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if any component of the path does not
    /// exist, and [`Error::Io`] for other failures such as a permission
    /// problem.
    pub fn realpath(&self) -> Result<PathValue> {
        let real = fs::canonicalize(self.as_std_path()).map_err(|e| {
            // a file used as a directory is just as missing
            if e.kind() == ErrorKind::NotADirectory {
                Error::NotFound {
                    path: self.to_path_buf(),
                }
            } else {
                Error::from_lookup("realpath", self, e)
            }
        })?;
        PathValue::from_host(&strip_verbatim(&real))
    }

    /// This path relative to `base`.
    ///
    /// Both paths are made absolute against the current directory and
    /// compared lexically; the filesystem is not consulted, so `..` segments
    /// and symlinks in either path are taken at face value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the two paths are on different
    /// volumes, and an I/O error if the current directory cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let file = path(["/srv/www/index.html"]).unwrap();
    /// let rel = file.relative(&path(["/srv/logs"]).unwrap()).unwrap();
    /// assert_eq!(rel.as_str(), "../www/index.html");
    /// ```
    pub fn relative(&self, base: &PathValue) -> Result<PathValue> {
        let target = self.absolute(None)?;
        let base = base.absolute(None)?;

        if !target.volume().eq_ignore_ascii_case(base.volume()) {
            return Err(Error::invalid(format!(
                "cannot express '{target}' relative to '{base}' on another volume"
            )));
        }

        let target_names = target.names();
        let base_names = base.names();
        let common = target_names
            .iter()
            .zip(&base_names)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts = vec![".."; base_names.len() - common];
        parts.extend_from_slice(&target_names[common..]);

        if parts.is_empty() {
            return Ok(PathValue::from_canonical(".".to_string()));
        }
        Ok(PathValue::from_joined(&parts.join("/")))
    }
}

#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
fn join_onto(base: &PathValue, relative: &PathValue) -> Result<PathValue> {
    Ok(base.child([relative.as_str()]))
}

#[cfg(windows)]
fn join_onto(base: &PathValue, relative: &PathValue) -> Result<PathValue> {
    let raw = relative.as_str();
    if raw.starts_with('/') {
        // rooted but volume-less: borrow the base's volume
        return Ok(PathValue::from_joined(&format!("{}{raw}", base.volume())));
    }
    if !relative.volume().is_empty() {
        // drive-relative (`C:foo`) uses that drive's own working directory
        let full = std::path::absolute(relative.as_std_path())
            .map_err(|e| Error::io("absolute", relative, e))?;
        return PathValue::from_host(&full);
    }
    Ok(base.child([raw]))
}

/// Drop the `\\?\` prefix Windows adds to canonicalized paths.
#[cfg(windows)]
fn strip_verbatim(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) if s.starts_with(r"\\?\UNC\") => PathBuf::from(format!(r"\\{}", &s[8..])),
        Some(s) if s.starts_with(r"\\?\") => PathBuf::from(&s[4..]),
        _ => path.to_path_buf(),
    }
}

#[cfg(not(windows))]
fn strip_verbatim(path: &Path) -> PathBuf {
    path.to_path_buf()
}

/// Follow a chain of symlinks to the object it finally names.
///
/// Only the last component is followed, hop by hop. A path that does not
/// exist, or a dangling link, resolves to itself or to the missing target.
///
/// # Errors
///
/// Returns [`Error::SymlinkLoop`] if a link is revisited or the chain is
/// deeper than the hop limit.
pub(crate) fn resolve_symlinks(path: &PathValue) -> Result<PathValue> {
    let mut visited = HashSet::new();
    let mut current = path.clone();

    loop {
        match fs::symlink_metadata(current.as_std_path()) {
            Ok(meta) if meta.file_type().is_symlink() => {}
            Ok(_) => return Ok(current),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(current),
            Err(e) => return Err(Error::io("lstat", &current, e)),
        }

        if visited.len() >= MAX_SYMLINK_DEPTH || !visited.insert(current.clone()) {
            return Err(Error::SymlinkLoop {
                path: current.to_path_buf(),
            });
        }

        let target =
            fs::read_link(current.as_std_path()).map_err(|e| Error::io("readlink", &current, e))?;
        let target = PathValue::from_host(&target)?;
        current = if target.is_absolute() {
            target
        } else {
            current.sibling([target.as_str()])
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn p(raw: &str) -> PathValue {
        PathValue::new(raw).unwrap()
    }

    #[test]
    fn test_cwd_matches_process_directory() {
        let expected = std::env::current_dir().unwrap();
        assert_eq!(cwd().unwrap().as_std_path(), expected.as_path());
    }

    #[test]
    fn test_rootdir_is_root() {
        let root = rootdir().unwrap();
        assert!(root.is_rootdir());
        assert!(root.is_absolute());
    }

    #[test]
    fn test_absolute_leaves_absolute_paths_alone() {
        let root = rootdir().unwrap();
        let abs = root.child(["etc", "hosts"]);
        assert_eq!(abs.absolute(None).unwrap(), abs);
    }

    #[test]
    fn test_absolute_uses_cwd_by_default() {
        let abs = p("some/file").absolute(None).unwrap();
        assert_eq!(abs, cwd().unwrap().child(["some", "file"]));
    }

    #[test]
    fn test_absolute_with_relative_base() {
        let abs = p("file").absolute(Some(&p("dir"))).unwrap();
        assert_eq!(abs, cwd().unwrap().child(["dir", "file"]));
    }

    #[test]
    fn test_absolute_keeps_parent_segments() {
        let base = rootdir().unwrap().child(["srv"]);
        let abs = p("../x").absolute(Some(&base)).unwrap();
        assert!(abs.as_str().ends_with("srv/../x"));
    }

    #[test]
    fn test_relative_to_ancestor() {
        let root = rootdir().unwrap();
        let file = root.child(["a", "b", "c.txt"]);
        assert_eq!(file.relative(&root.child(["a"])).unwrap(), "b/c.txt");
    }

    #[test]
    fn test_relative_to_sibling_tree() {
        let root = rootdir().unwrap();
        let file = root.child(["a", "b", "c.txt"]);
        let base = root.child(["a", "x", "y"]);
        assert_eq!(file.relative(&base).unwrap(), "../../b/c.txt");
    }

    #[test]
    fn test_relative_to_self_is_dot() {
        let dir = rootdir().unwrap().child(["a"]);
        assert_eq!(dir.relative(&dir).unwrap(), ".");
    }

    #[test]
    fn test_relative_to_descendant() {
        let root = rootdir().unwrap();
        let dir = root.child(["a"]);
        assert_eq!(dir.relative(&root.child(["a", "b", "c"])).unwrap(), "../..");
    }

    #[test]
    fn test_relative_between_relative_paths() {
        assert_eq!(p("a/b").relative(&p("a/c")).unwrap(), "../b");
    }

    #[test]
    fn test_realpath_resolves_dot_dot() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();

        let via_parent = base.child(["sub", ".."]).realpath().unwrap();
        assert_eq!(via_parent, base.realpath().unwrap());
    }

    #[test]
    fn test_realpath_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = PathValue::try_from(dir.path()).unwrap().child(["missing", "x"]);
        let err = missing.realpath().unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_realpath_through_a_file_is_not_found() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file"), b"x").unwrap();
        let bogus = PathValue::try_from(dir.path()).unwrap().child(["file", "x"]);
        assert!(bogus.realpath().unwrap_err().is_not_found());
    }

    #[test]
    #[cfg(unix)]
    fn test_realpath_follows_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        std::fs::create_dir(&target).unwrap();
        symlink(&target, dir.path().join("link")).unwrap();

        let base = PathValue::try_from(dir.path()).unwrap();
        let resolved = base.child(["link"]).realpath().unwrap();
        assert_eq!(resolved, base.child(["target"]).realpath().unwrap());
    }

    #[test]
    fn test_resolve_symlinks_plain_and_missing() {
        let dir = tempdir().unwrap();
        let base = PathValue::try_from(dir.path()).unwrap();
        assert_eq!(resolve_symlinks(&base).unwrap(), base);

        let missing = base.child(["nope"]);
        assert_eq!(resolve_symlinks(&missing).unwrap(), missing);
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_symlinks_relative_chain() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("real.txt"), b"x").unwrap();
        symlink("real.txt", dir.path().join("one")).unwrap();
        symlink("one", dir.path().join("two")).unwrap();

        let base = PathValue::try_from(dir.path()).unwrap();
        let resolved = resolve_symlinks(&base.child(["two"])).unwrap();
        assert_eq!(resolved, base.child(["real.txt"]));
    }

    #[test]
    #[cfg(unix)]
    fn test_resolve_symlinks_detects_loop() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        symlink("b", dir.path().join("a")).unwrap();
        symlink("a", dir.path().join("b")).unwrap();

        let base = PathValue::try_from(dir.path()).unwrap();
        let err = resolve_symlinks(&base.child(["a"])).unwrap_err();
        assert!(matches!(err, Error::SymlinkLoop { .. }));
    }
}
