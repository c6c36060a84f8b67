//! Option structures for individual calls.
//!
//! Each struct lists exactly the options one family of operations accepts.
//! Every field has a default, and unknown fields are rejected when an
//! options document is deserialized.

use serde::{Deserialize, Serialize};

use crate::config::binmode::Binmode;
use crate::path::PathValue;

/// Options for [`PathValue::slurp`].
///
/// # Examples
///
/// ```
/// use tidypath::{Binmode, ReadOptions};
///
/// let options = ReadOptions::default().with_binmode(Binmode::Utf8);
/// assert_eq!(options.binmode, Binmode::Utf8);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ReadOptions {
    /// Encoding applied to the bytes read.
    pub binmode: Binmode,
}

impl ReadOptions {
    /// Set the encoding mode.
    #[must_use]
    pub fn with_binmode(mut self, binmode: Binmode) -> Self {
        self.binmode = binmode;
        self
    }
}

/// Options for [`PathValue::lines`].
///
/// # Examples
///
/// ```
/// use tidypath::LinesOptions;
///
/// // the last two lines, without terminators
/// let options = LinesOptions::default()
///     .with_count(2)
///     .with_chomp(true)
///     .with_from_end(true);
/// assert_eq!(options.count, Some(2));
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LinesOptions {
    /// Encoding applied to each line.
    pub binmode: Binmode,

    /// Maximum number of lines to return. Must be positive.
    pub count: Option<usize>,

    /// Strip the line terminator from each line.
    pub chomp: bool,

    /// Take `count` lines from the end of the file instead of the start.
    pub from_end: bool,
}

impl LinesOptions {
    /// Set the encoding mode.
    #[must_use]
    pub fn with_binmode(mut self, binmode: Binmode) -> Self {
        self.binmode = binmode;
        self
    }

    /// Limit the number of lines returned.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Strip line terminators.
    #[must_use]
    pub fn with_chomp(mut self, chomp: bool) -> Self {
        self.chomp = chomp;
        self
    }

    /// Count lines from the end of the file.
    #[must_use]
    pub fn with_from_end(mut self, from_end: bool) -> Self {
        self.from_end = from_end;
        self
    }
}

/// Options for [`PathValue::spew`] and the edit operations.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct WriteOptions {
    /// Encoding applied to the data written.
    pub binmode: Binmode,
}

impl WriteOptions {
    /// Set the encoding mode.
    #[must_use]
    pub fn with_binmode(mut self, binmode: Binmode) -> Self {
        self.binmode = binmode;
        self
    }
}

/// Options for [`PathValue::append`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct AppendOptions {
    /// Encoding applied to the data written.
    pub binmode: Binmode,

    /// Empty the file, under the lock, before writing.
    pub truncate: bool,
}

impl AppendOptions {
    /// Set the encoding mode.
    #[must_use]
    pub fn with_binmode(mut self, binmode: Binmode) -> Self {
        self.binmode = binmode;
        self
    }

    /// Truncate before appending.
    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }
}

/// Options for [`PathValue::iterator`], [`PathValue::visit`] and friends.
///
/// # Examples
///
/// ```
/// use tidypath::IterOptions;
///
/// let options: IterOptions = serde_yaml::from_str("recurse: true").unwrap();
/// assert!(options.recurse);
/// assert!(!options.follow_symlinks);
///
/// let unknown: Result<IterOptions, _> = serde_yaml::from_str("recursive: true");
/// assert!(unknown.is_err());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct IterOptions {
    /// Descend into subdirectories, breadth-first.
    pub recurse: bool,

    /// Descend through symlinks to directories. Cycles are not detected.
    pub follow_symlinks: bool,
}

impl IterOptions {
    /// Recurse into subdirectories.
    #[must_use]
    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Follow symlinked directories while recursing.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

/// Options for [`PathValue::remove_tree`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct TreeOptions {
    /// Keep going after a failed entry and report every failure at the end.
    pub safe: bool,

    /// Empty the directory but leave the directory itself in place.
    pub keep_root: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            safe: true,
            keep_root: false,
        }
    }
}

impl TreeOptions {
    /// Collect failures instead of stopping at the first one.
    #[must_use]
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Keep the root directory.
    #[must_use]
    pub fn with_keep_root(mut self, keep_root: bool) -> Self {
        self.keep_root = keep_root;
        self
    }
}

/// Options for [`PathValue::mkpath`].
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct MkpathOptions {
    /// Report failures as an aggregate tree error instead of a bare I/O error.
    pub safe: bool,

    /// Permission bits for created directories, before the umask. Ignored
    /// where the platform has no such bits.
    pub mode: Option<u32>,
}

impl Default for MkpathOptions {
    fn default() -> Self {
        Self {
            safe: true,
            mode: None,
        }
    }
}

impl MkpathOptions {
    /// Collect failures into an aggregate error.
    #[must_use]
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Set the permission bits for new directories.
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Options for [`tempfile`](crate::tempfile) and [`tempdir`](crate::tempdir).
///
/// Upper-case spellings of the field names are accepted as aliases.
///
/// # Examples
///
/// ```
/// use tidypath::TempOptions;
///
/// let options: TempOptions = serde_yaml::from_str("TEMPLATE: build-XXXXXX").unwrap();
/// assert_eq!(options.template.as_deref(), Some("build-XXXXXX"));
/// assert!(options.tmpdir);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct TempOptions {
    /// Name template. Trailing `X` characters are replaced with random
    /// characters; at least four are required.
    #[serde(alias = "TEMPLATE")]
    pub template: Option<String>,

    /// Fixed suffix appended after the random part.
    #[serde(alias = "SUFFIX")]
    pub suffix: Option<String>,

    /// Directory to create the resource in.
    #[serde(alias = "DIR")]
    pub dir: Option<PathValue>,

    /// Use the system temp directory when no `dir` is given. Otherwise the
    /// current directory is used.
    #[serde(alias = "TMPDIR")]
    pub tmpdir: bool,

    /// Resolve symlinks in the returned path.
    pub realpath: bool,
}

impl Default for TempOptions {
    fn default() -> Self {
        Self {
            template: None,
            suffix: None,
            dir: None,
            tmpdir: true,
            realpath: false,
        }
    }
}

impl TempOptions {
    /// Set the name template.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the name suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Create the resource in `dir`.
    #[must_use]
    pub fn with_dir(mut self, dir: PathValue) -> Self {
        self.dir = Some(dir);
        self
    }

    /// Choose between the system temp directory and the current directory.
    #[must_use]
    pub fn with_tmpdir(mut self, tmpdir: bool) -> Self {
        self.tmpdir = tmpdir;
        self
    }

    /// Resolve symlinks in the returned path.
    #[must_use]
    pub fn with_realpath(mut self, realpath: bool) -> Self {
        self.realpath = realpath;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ReadOptions::default().binmode, Binmode::Default);
        assert!(TreeOptions::default().safe);
        assert!(MkpathOptions::default().safe);
        assert!(TempOptions::default().tmpdir);
        assert_eq!(LinesOptions::default().count, None);
    }

    #[test]
    fn test_empty_document_is_default() {
        let options: TreeOptions = serde_yaml::from_str("{}").unwrap();
        assert_eq!(options, TreeOptions::default());
    }

    #[test]
    fn test_lines_options_from_yaml() {
        let yaml = "binmode: ':encoding(UTF-8)'\ncount: 3\nchomp: true\n";
        let options: LinesOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.binmode, Binmode::Utf8);
        assert_eq!(options.count, Some(3));
        assert!(options.chomp);
        assert!(!options.from_end);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<LinesOptions, _> = serde_yaml::from_str("chmop: true");
        assert!(result.is_err());
    }

    #[test]
    fn test_temp_options_aliases() {
        let yaml = "TEMPLATE: run-XXXXXX\nDIR: ./scratch/\nTMPDIR: false\n";
        let options: TempOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.template.as_deref(), Some("run-XXXXXX"));
        assert_eq!(options.dir.unwrap(), "scratch");
        assert!(!options.tmpdir);
    }

    #[test]
    fn test_builders() {
        let options = TempOptions::default()
            .with_template("x-XXXX")
            .with_suffix(".txt")
            .with_tmpdir(false)
            .with_realpath(true);
        assert_eq!(options.suffix.as_deref(), Some(".txt"));
        assert!(!options.tmpdir);
        assert!(options.realpath);

        let tree = TreeOptions::default().with_safe(false).with_keep_root(true);
        assert!(!tree.safe);
        assert!(tree.keep_root);

        let mkpath = MkpathOptions::default().with_mode(0o700);
        assert_eq!(mkpath.mode, Some(0o700));
    }
}
