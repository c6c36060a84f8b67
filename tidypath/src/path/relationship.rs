//! Lexical relationships between paths.
//!
//! Relationships are decided purely on canonical strings. Symlinks and `..`
//! segments are not interpreted, so `a/../b` is a descendant of `a`.

use crate::error::Result;
use crate::path::value::PathValue;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use tidypath::{path, PathRelationship};
///
/// let parent = path(["/home/user"]).unwrap();
/// let child = path(["/home/user/project"]).unwrap();
///
/// assert_eq!(
///     PathRelationship::between(&parent, &child),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    Same,

    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths, lexically.
    ///
    /// A prefix only counts when it ends at a separator, so `/a` is not an
    /// ancestor of `/ab`. The relative path `.` is an ancestor of every other
    /// relative path. An absolute path and a relative one are unrelated; use
    /// [`PathValue::subsumes`] to compare them through the current directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{path, PathRelationship};
    ///
    /// let a = path(["/a"]).unwrap();
    /// let ab = path(["/a/b"]).unwrap();
    /// let b = path(["/b"]).unwrap();
    ///
    /// assert_eq!(PathRelationship::between(&a, &ab), PathRelationship::Ancestor);
    /// assert_eq!(PathRelationship::between(&ab, &a), PathRelationship::Descendant);
    /// assert_eq!(PathRelationship::between(&a, &a), PathRelationship::Same);
    /// assert_eq!(PathRelationship::between(&a, &b), PathRelationship::Unrelated);
    /// ```
    #[must_use]
    pub fn between(path1: &PathValue, path2: &PathValue) -> Self {
        if path1 == path2 {
            return Self::Same;
        }
        if contains_lexically(path1, path2) {
            return Self::Ancestor;
        }
        if contains_lexically(path2, path1) {
            return Self::Descendant;
        }
        Self::Unrelated
    }

    /// Check if the relationship is hierarchical (not unrelated).
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Get a human-readable description of the relationship.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{path, PathRelationship};
    ///
    /// let p1 = path(["/a"]).unwrap();
    /// let p2 = path(["/a/b"]).unwrap();
    ///
    /// let desc = PathRelationship::Ancestor.description(&p1, &p2);
    /// assert!(desc.contains("ancestor"));
    /// ```
    #[must_use]
    pub fn description(&self, path1: &PathValue, path2: &PathValue) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}

/// Whether `outer` is a strict lexical ancestor of `inner`.
fn contains_lexically(outer: &PathValue, inner: &PathValue) -> bool {
    if outer.is_absolute() != inner.is_absolute() {
        return false;
    }
    let (outer, inner) = (outer.as_str(), inner.as_str());

    if outer == "." {
        return inner != ".";
    }

    // a root already ends with its separator
    let rest = if outer.ends_with('/') {
        inner.strip_prefix(outer)
    } else {
        inner.strip_prefix(outer).and_then(|r| r.strip_prefix('/'))
    };
    matches!(rest, Some(r) if !r.is_empty())
}

impl PathValue {
    /// Whether this path is the same as, or an ancestor of, `other`.
    ///
    /// When exactly one of the two paths is relative it is made absolute
    /// against the current directory first. The comparison itself is
    /// lexical.
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
    /// let dir = path(["/a/b"]).unwrap();
    /// assert!(dir.subsumes(&path(["/a/b/c"]).unwrap()).unwrap());
    /// assert!(dir.subsumes(&dir).unwrap());
    /// assert!(!dir.subsumes(&path(["/a/bc"]).unwrap()).unwrap());
    /// ```
    pub fn subsumes(&self, other: &PathValue) -> Result<bool> {
        let relationship = match (self.is_absolute(), other.is_absolute()) {
            (true, false) => PathRelationship::between(self, &other.absolute(None)?),
            (false, true) => PathRelationship::between(&self.absolute(None)?, other),
            _ => PathRelationship::between(self, other),
        };
        Ok(matches!(
            relationship,
            PathRelationship::Ancestor | PathRelationship::Same
        ))
    }
}
