//! The immutable path value type.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::canonicalize::{canonicalize, clean, keep_tilde_literal, split_volume};

/// Build a [`PathValue`] from one or more components.
///
/// Components are joined with `/` and canonicalized. A leading `~` is
/// expanded to the home directory.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the first component is missing or
/// empty. No filesystem access happens before that check.
///
/// # Examples
///
/// ```
/// use tidypath::path;
///
/// let file = path(["foo", "bar.txt"]).unwrap();
/// assert_eq!(file.basename(), "bar.txt");
/// assert_eq!(file.dirname(), "foo/");
///
/// assert_eq!(path(["./a/b"]).unwrap(), path(["a/b"]).unwrap());
/// assert!(path([""]).is_err());
/// ```
pub fn path<I, S>(components: I) -> Result<PathValue>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    canonicalize(components)
}

/// An immutable, normalized filesystem path.
///
/// The path is stored in canonical form using `/` as the only separator.
/// Two values are equal exactly when their canonical strings are equal,
/// however they were constructed. Every operation that "changes" a path
/// returns a new value.
///
/// The canonical form never has an empty segment except the leading one
/// that marks an absolute path, and never ends in a separator unless it is
/// the root itself.
///
/// # Examples
///
/// ```
/// use tidypath::PathValue;
///
/// let p: PathValue = "a//b/./c/".parse().unwrap();
/// assert_eq!(p.as_str(), "a/b/c");
/// assert_eq!(p.parent(2).as_str(), "a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathValue {
    raw: String,
}

impl PathValue {
    /// Canonicalize a single string into a path.
    ///
    /// Equivalent to `path([raw])`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `raw` is empty.
    pub fn new(raw: &str) -> Result<Self> {
        canonicalize([raw])
    }

    /// Wrap a string that is already in canonical form.
    pub(crate) fn from_canonical(raw: String) -> Self {
        Self { raw }
    }

    /// Build a derived path by cleaning `joined`.
    ///
    /// Unlike [`PathValue::new`] this never expands `~`, so values derived
    /// from an existing path stay lexically tied to it. A leading `~` left
    /// by cleaning is kept literal.
    pub(crate) fn from_joined(joined: &str) -> Self {
        Self {
            raw: keep_tilde_literal(clean(joined)),
        }
    }

    /// Wrap a path reported by the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the path is not valid UTF-8.
    pub(crate) fn from_host(path: &Path) -> Result<Self> {
        let raw = path.to_str().ok_or_else(|| {
            Error::invalid(format!("path contains invalid UTF-8: {}", path.display()))
        })?;
        if cfg!(windows) {
            Ok(Self::from_joined(&raw.replace('\\', "/")))
        } else {
            Ok(Self::from_joined(raw))
        }
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// This path as a standard library [`Path`].
    #[must_use]
    pub fn as_std_path(&self) -> &Path {
        Path::new(&self.raw)
    }

    /// This path as an owned [`PathBuf`].
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.raw)
    }

    /// The volume prefix: a drive (`C:`) or UNC prefix on Windows, and
    /// always empty elsewhere.
    #[must_use]
    pub fn volume(&self) -> &str {
        split_volume(&self.raw).0
    }

    /// Whether the path is absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// assert!(path(["/tmp"]).unwrap().is_absolute() || cfg!(windows));
    /// assert!(path(["tmp"]).unwrap().is_relative());
    /// ```
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.as_std_path().is_absolute()
    }

    /// Whether the path is relative.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Whether this is a root directory (`/`, or `C:/` on Windows).
    #[must_use]
    pub fn is_rootdir(&self) -> bool {
        let (_, rest) = split_volume(&self.raw);
        rest == "/"
    }

    /// Split into volume, directory part (with trailing `/`) and file part.
    fn split(&self) -> (&str, &str, &str) {
        let (volume, rest) = split_volume(&self.raw);
        match rest.rfind('/') {
            Some(idx) => (volume, &rest[..=idx], &rest[idx + 1..]),
            None => (volume, "", rest),
        }
    }

    /// The last component of the path.
    ///
    /// The root directory has an empty basename.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// assert_eq!(path(["foo/bar.txt"]).unwrap().basename(), "bar.txt");
    /// assert_eq!(path(["/"]).unwrap().basename(), "");
    /// ```
    #[must_use]
    pub fn basename(&self) -> &str {
        self.split().2
    }

    /// The last component with the first matching suffix removed.
    ///
    /// A suffix equal to the whole basename is not removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let p = path(["dir/archive.tar.gz"]).unwrap();
    /// assert_eq!(p.basename_without(&[".zip", ".tar.gz"]), "archive");
    /// assert_eq!(p.basename_without(&[".txt"]), "archive.tar.gz");
    /// ```
    #[must_use]
    pub fn basename_without(&self, suffixes: &[&str]) -> &str {
        let base = self.basename();
        suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty() && suffix.len() < base.len())
            .find_map(|suffix| base.strip_suffix(suffix))
            .unwrap_or(base)
    }

    /// The directory part of the path, including its trailing separator.
    ///
    /// A path with no directory part has a dirname of `"."`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// assert_eq!(path(["foo/bar.txt"]).unwrap().dirname(), "foo/");
    /// assert_eq!(path(["bar.txt"]).unwrap().dirname(), ".");
    /// ```
    #[must_use]
    pub fn dirname(&self) -> String {
        let (volume, dir, _) = self.split();
        let dirname = format!("{volume}{dir}");
        if dirname.is_empty() {
            ".".to_string()
        } else {
            dirname
        }
    }

    /// The ancestor `levels` steps up; `0` is treated as `1`.
    ///
    /// This is lexical. The parent of `.` is `..`, the parent of a path
    /// ending in `..` gets another `..` appended, and the root is its own
    /// parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let p = path(["a/b/baz"]).unwrap();
    /// assert_eq!(p.parent(1).as_str(), "a/b");
    /// assert_eq!(p.parent(2).as_str(), "a");
    /// assert_eq!(p.parent(3).as_str(), ".");
    /// assert_eq!(p.parent(4).as_str(), "..");
    /// ```
    #[must_use]
    pub fn parent(&self, levels: usize) -> PathValue {
        let mut current = self.parent_once();
        for _ in 1..levels {
            current = current.parent_once();
        }
        current
    }

    fn parent_once(&self) -> PathValue {
        let (volume, dir, file) = self.split();
        if file.is_empty() {
            // root directory or bare volume
            return self.clone();
        }
        if file == "." || file == ".." {
            return Self::from_joined(&format!("{}/..", self.raw));
        }
        Self::from_joined(&format!("{volume}{dir}"))
    }

    /// The ordered components of the path.
    ///
    /// An absolute path starts with its root (`/`, or `C:/` on Windows).
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// assert_eq!(path(["a/b/c"]).unwrap().components(), vec!["a", "b", "c"]);
    /// # #[cfg(unix)]
    /// assert_eq!(path(["/a/b"]).unwrap().components(), vec!["/", "a", "b"]);
    /// ```
    #[must_use]
    pub fn components(&self) -> Vec<&str> {
        let (volume, rest) = split_volume(&self.raw);
        let mut components = Vec::new();
        let body = if let Some(body) = rest.strip_prefix('/') {
            components.push(&self.raw[..=volume.len()]);
            body
        } else {
            if !volume.is_empty() {
                components.push(volume);
            }
            rest
        };
        components.extend(body.split('/').filter(|s| !s.is_empty()));
        components
    }

    /// The named segments below the root, excluding the volume.
    pub(crate) fn names(&self) -> Vec<&str> {
        let (_, rest) = split_volume(&self.raw);
        rest.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// A path below this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let dir = path(["/srv"]).unwrap();
    /// assert_eq!(dir.child(["www", "index.html"]).as_str(), "/srv/www/index.html");
    /// ```
    #[must_use]
    pub fn child<I, S>(&self, parts: I) -> PathValue
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = self.raw.clone();
        for part in parts {
            joined.push('/');
            joined.push_str(part.as_ref());
        }
        Self::from_joined(&joined)
    }

    /// A path next to this one, below its parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::path;
    ///
    /// let file = path(["conf/app.yaml"]).unwrap();
    /// assert_eq!(file.sibling(["app.local.yaml"]).as_str(), "conf/app.local.yaml");
    /// ```
    #[must_use]
    pub fn sibling<I, S>(&self, parts: I) -> PathValue
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parent(1).child(parts)
    }

    /// Consume the value, returning the canonical string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PathValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for PathValue {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for PathValue {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&Path> for PathValue {
    type Error = Error;

    fn try_from(value: &Path) -> Result<Self> {
        let raw = value.to_str().ok_or_else(|| {
            Error::invalid(format!("path contains invalid UTF-8: {}", value.display()))
        })?;
        Self::new(raw)
    }
}

impl TryFrom<PathBuf> for PathValue {
    type Error = Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        Self::try_from(value.as_path())
    }
}

impl From<PathValue> for String {
    fn from(value: PathValue) -> Self {
        value.raw
    }
}

impl From<PathValue> for PathBuf {
    fn from(value: PathValue) -> Self {
        PathBuf::from(value.raw)
    }
}

impl From<&PathValue> for PathBuf {
    fn from(value: &PathValue) -> Self {
        value.to_path_buf()
    }
}

impl AsRef<Path> for PathValue {
    fn as_ref(&self) -> &Path {
        self.as_std_path()
    }
}

impl AsRef<str> for PathValue {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq<str> for PathValue {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for PathValue {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}
