//! Path canonicalization.
//!
//! Raw input is reduced to a single canonical string form:
//! - Segments are joined with `/`, which is the only separator used
//!   internally on every platform
//! - A leading `~` or `~name` is expanded to a home directory when possible.
//!   A `~` that stays unexpanded is kept behind `./`, so it is never read
//!   as a home directory later
//! - A bare volume (`C:`) becomes the current directory on that volume
//! - Duplicate separators, `.` segments and trailing separators are removed
//!
//! `..` segments are kept as-is. Resolving them correctly needs the
//! filesystem (symlinks), so only [`PathValue::realpath`] does it.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::path::tilde;
use crate::path::value::PathValue;

/// Canonicalize a sequence of path segments into a [`PathValue`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if there is no first segment or it is
/// empty. This check happens before any other work, so an empty string can
/// never silently turn into the current or root directory. On platforms
/// with volumes, expanding a bare volume may also fail with an I/O error.
///
/// # Examples
///
/// ```
/// use tidypath::path::canonicalize::canonicalize;
///
/// let path = canonicalize(["foo", "./bar//baz/"]).unwrap();
/// assert_eq!(path.as_str(), "foo/bar/baz");
///
/// // `..` is left for realpath to resolve
/// let path = canonicalize(["a/../b"]).unwrap();
/// assert_eq!(path.as_str(), "a/../b");
///
/// assert!(canonicalize([""]).is_err());
/// ```
pub fn canonicalize<I, S>(segments: I) -> Result<PathValue>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments = segments.into_iter();
    let first = segments
        .next()
        .ok_or_else(|| Error::invalid("a path needs at least one component"))?;
    let first = first.as_ref();
    if first.is_empty() {
        return Err(Error::invalid("the first path component must be non-empty"));
    }

    let mut joined = String::from(first);
    for segment in segments {
        joined.push('/');
        joined.push_str(segment.as_ref());
    }

    let joined = to_forward_slashes(&joined);
    let expanded = tilde::expand_tilde(&joined);
    let was_expanded = matches!(expanded, Cow::Owned(_));
    let cleaned = clean(&expanded);
    let cleaned = if was_expanded {
        cleaned
    } else {
        keep_tilde_literal(cleaned)
    };
    let cleaned = expand_bare_volume(cleaned)?;

    Ok(PathValue::from_canonical(cleaned))
}

/// Clean an already-joined path string without touching the environment.
///
/// This is the pure part of canonicalization: it collapses duplicate
/// separators, drops `.` segments and the trailing separator, and drops
/// `..` directly under the root (`/..` is `/`). Any other `..` is kept.
///
/// # Examples
///
/// ```
/// use tidypath::path::canonicalize::clean;
///
/// assert_eq!(clean("./foo.txt"), "foo.txt");
/// assert_eq!(clean("a//b/./c/"), "a/b/c");
/// assert_eq!(clean("/../x"), "/x");
/// assert_eq!(clean("./"), ".");
/// assert_eq!(clean("//"), "/");
/// ```
#[must_use]
pub fn clean(raw: &str) -> String {
    let (volume, rest) = split_volume(raw);
    let absolute = rest.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." if absolute && parts.is_empty() => {}
            _ => parts.push(part),
        }
    }

    let mut out = String::with_capacity(raw.len());
    if volume.len() == 2 {
        out.push_str(&volume.to_ascii_uppercase());
    } else {
        out.push_str(volume);
    }
    if absolute {
        out.push('/');
    }
    out.push_str(&parts.join("/"));

    if out.is_empty() {
        out.push('.');
    }
    out
}

/// Prefix a cleaned path that starts with `~` with `./`.
///
/// `clean` drops a leading `./`, which would turn a file literally named
/// `~` into a home directory reference the next time the string is parsed.
pub(crate) fn keep_tilde_literal(cleaned: String) -> String {
    if cleaned.starts_with('~') {
        format!("./{cleaned}")
    } else {
        cleaned
    }
}

/// Split a canonical path string into its volume and the remainder.
///
/// The volume is a drive (`C:`) or a UNC prefix (`//server/share`) on
/// Windows and always empty elsewhere.
#[must_use]
pub fn split_volume(raw: &str) -> (&str, &str) {
    if cfg!(windows) {
        split_windows_volume(raw)
    } else {
        ("", raw)
    }
}

fn split_windows_volume(raw: &str) -> (&str, &str) {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return raw.split_at(2);
    }

    if let Some(unc) = raw.strip_prefix("//") {
        let mut parts = unc.splitn(3, '/');
        if let (Some(server), Some(share)) = (parts.next(), parts.next()) {
            if !server.is_empty() && !share.is_empty() {
                return raw.split_at(2 + server.len() + 1 + share.len());
            }
        }
    }

    ("", raw)
}

fn to_forward_slashes(raw: &str) -> Cow<'_, str> {
    if cfg!(windows) && raw.contains('\\') {
        Cow::Owned(raw.replace('\\', "/"))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(windows)]
fn expand_bare_volume(cleaned: String) -> Result<String> {
    let (volume, rest) = split_volume(&cleaned);
    if volume.len() != 2 || !rest.is_empty() {
        return Ok(cleaned);
    }

    // GetFullPathName knows the per-drive working directory
    let full = std::path::absolute(volume).map_err(|e| Error::io("absolute", volume, e))?;
    let full = full
        .to_str()
        .ok_or_else(|| Error::invalid("current directory contains invalid UTF-8"))?;
    Ok(clean(&full.replace('\\', "/")))
}

#[cfg(not(windows))]
#[allow(clippy::unnecessary_wraps)]
fn expand_bare_volume(cleaned: String) -> Result<String> {
    Ok(cleaned)
}
