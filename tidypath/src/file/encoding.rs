//! Byte and text transformations for each [`Binmode`].

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::config::Binmode;
use crate::error::{Error, Result};

/// File contents as read under some [`Binmode`].
///
/// `Raw` reads produce bytes and every other mode produces text.
///
/// # Examples
///
/// ```
/// use tidypath::Content;
///
/// let text = Content::Text("hello".to_string());
/// assert_eq!(text.as_bytes(), b"hello");
/// assert_eq!(text.as_str(), Some("hello"));
/// assert!(text == "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Untransformed bytes.
    Bytes(Vec<u8>),
    /// Decoded text.
    Text(String),
}

impl Content {
    /// The contents as bytes, whichever form they are in.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    /// Consume into bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
        }
    }

    /// The text, if this is text or valid UTF-8 bytes.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            Self::Text(text) => Some(text),
        }
    }

    /// Consume into text, replacing invalid UTF-8 in raw bytes.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
            Self::Text(text) => text,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq<str> for Content {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Content {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl AsRef<[u8]> for Content {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Decode bytes read from `path`.
pub(crate) fn decode(bytes: Vec<u8>, binmode: Binmode, path: &Path) -> Result<Content> {
    match binmode {
        Binmode::Raw => Ok(Content::Bytes(bytes)),
        Binmode::Utf8 => String::from_utf8(bytes)
            .map(Content::Text)
            .map_err(|e| Error::Encoding {
                path: path.to_path_buf(),
                source: e.utf8_error(),
            }),
        Binmode::Default => {
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            };
            Ok(Content::Text(from_host_newlines(text)))
        }
    }
}

/// Encode bytes to be written to `path`.
pub(crate) fn encode<'a>(data: &'a [u8], binmode: Binmode, path: &Path) -> Result<Cow<'a, [u8]>> {
    match binmode {
        Binmode::Raw => Ok(Cow::Borrowed(data)),
        Binmode::Utf8 => {
            std::str::from_utf8(data).map_err(|source| Error::Encoding {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Cow::Borrowed(data))
        }
        Binmode::Default => Ok(to_host_newlines(data)),
    }
}

#[cfg(windows)]
fn from_host_newlines(text: String) -> String {
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}

#[cfg(not(windows))]
fn from_host_newlines(text: String) -> String {
    text
}

#[cfg(windows)]
fn to_host_newlines(data: &[u8]) -> Cow<'_, [u8]> {
    if !data.contains(&b'\n') {
        return Cow::Borrowed(data);
    }
    let mut out = Vec::with_capacity(data.len() + data.len() / 16);
    let mut previous = 0u8;
    for &byte in data {
        if byte == b'\n' && previous != b'\r' {
            out.push(b'\r');
        }
        out.push(byte);
        previous = byte;
    }
    Cow::Owned(out)
}

#[cfg(not(windows))]
fn to_host_newlines(data: &[u8]) -> Cow<'_, [u8]> {
    Cow::Borrowed(data)
}
