//! Encoding modes for file reads and writes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// How file contents are transformed on the way in and out.
///
/// | mode | transformation | failure |
/// |---|---|---|
/// | `Default` | lossy UTF-8, host line endings | OS errors only |
/// | `Raw` | none | OS errors only |
/// | `Utf8` | strict UTF-8, no line ending translation | [`Error::Encoding`] |
///
/// # Examples
///
/// ```
/// use tidypath::Binmode;
///
/// assert_eq!(":raw".parse::<Binmode>().unwrap(), Binmode::Raw);
/// assert_eq!(":encoding(UTF-8)".parse::<Binmode>().unwrap(), Binmode::Utf8);
/// assert!(":crlf".parse::<Binmode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Binmode {
    /// Text with the host's conventions.
    #[default]
    Default,
    /// Bytes passed through untouched.
    Raw,
    /// Strict UTF-8 text.
    Utf8,
}

impl Binmode {
    /// The canonical name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Raw => "raw",
            Self::Utf8 => "utf8",
        }
    }

    /// Whether content in this mode is text rather than bytes.
    #[must_use]
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

impl fmt::Display for Binmode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Binmode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed {
            "" | "default" => return Ok(Self::Default),
            "raw" | ":raw" => return Ok(Self::Raw),
            "utf8" | ":utf8" => return Ok(Self::Utf8),
            _ => {}
        }

        // `:encoding(UTF-8)`, optionally layered on `:raw`
        let layer = trimmed.strip_prefix(":raw").unwrap_or(trimmed);
        if let Some(name) = layer
            .strip_prefix(":encoding(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            if name.eq_ignore_ascii_case("utf-8") || name.eq_ignore_ascii_case("utf8") {
                return Ok(Self::Utf8);
            }
        }

        Err(Error::invalid(format!("unsupported binmode: {s}")))
    }
}

impl Serialize for Binmode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Binmode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: Error| D::Error::custom(e.to_string()))
    }
}
