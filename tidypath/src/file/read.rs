//! Locked reads.
//!
//! Every read holds a shared advisory lock on the file from open to close.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};

use crate::config::{Binmode, LinesOptions, OptionsValidator, ReadOptions};
use crate::error::{Error, Result};
use crate::file::encoding::{decode, Content};
use crate::file::lock::{LockMode, LockedFile};
use crate::path::PathValue;

impl PathValue {
    /// Open this file for reading under a shared lock.
    pub(crate) fn open_shared(&self) -> Result<LockedFile> {
        if self.is_dir() {
            return Err(Error::NotAFile {
                path: self.to_path_buf(),
            });
        }
        let file = File::open(self.as_std_path()).map_err(|e| Error::io("open", self, e))?;
        LockedFile::acquire(file, self, LockMode::Shared)
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] for a directory, [`Error::Io`] if the file
    /// cannot be opened, locked or read (a missing file is an `Io` error of
    /// kind `NotFound`), and [`Error::Encoding`] for invalid UTF-8 in
    /// [`Binmode::Utf8`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempfile, ReadOptions, TempOptions, WriteOptions};
    ///
    /// let temp = tempfile(&TempOptions::default()).unwrap();
    /// temp.spew("hello", &WriteOptions::default()).unwrap();
    /// assert_eq!(temp.slurp(&ReadOptions::default()).unwrap(), "hello");
    /// ```
    pub fn slurp(&self, options: &ReadOptions) -> Result<Content> {
        let mut locked = self.open_shared()?;
        let mut bytes = Vec::new();
        locked
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io("read", self, e))?;
        drop(locked);

        log::trace!("read {} bytes from {self}", bytes.len());
        decode(bytes, options.binmode, self.as_std_path())
    }

    /// Read the whole file as bytes.
    ///
    /// # Errors
    ///
    /// See [`PathValue::slurp`].
    pub fn slurp_raw(&self) -> Result<Vec<u8>> {
        self.slurp(&ReadOptions::default().with_binmode(Binmode::Raw))
            .map(Content::into_bytes)
    }

    /// Read the whole file as strict UTF-8.
    ///
    /// # Errors
    ///
    /// See [`PathValue::slurp`].
    pub fn slurp_utf8(&self) -> Result<String> {
        self.slurp(&ReadOptions::default().with_binmode(Binmode::Utf8))
            .map(Content::into_string)
    }

    /// Read the file as lines.
    ///
    /// Lines end at `\n`, and the terminator is kept unless `chomp` is set.
    /// With `count`, reading stops as soon as that many lines have been
    /// read; with `from_end` as well, the last `count` lines are returned
    /// instead and the whole file is scanned. Raw lines are decoded lossily.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a zero `count`, and otherwise
    /// the same errors as [`PathValue::slurp`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempfile, LinesOptions, TempOptions, WriteOptions};
    ///
    /// let temp = tempfile(&TempOptions::default()).unwrap();
    /// temp.spew("one\ntwo\nthree\n", &WriteOptions::default()).unwrap();
    ///
    /// let first = temp.lines(&LinesOptions::default().with_count(1)).unwrap();
    /// assert_eq!(first, vec!["one\n"]);
    ///
    /// let last = temp
    ///     .lines(&LinesOptions::default().with_count(2).with_from_end(true).with_chomp(true))
    ///     .unwrap();
    /// assert_eq!(last, vec!["two", "three"]);
    /// ```
    pub fn lines(&self, options: &LinesOptions) -> Result<Vec<String>> {
        self.read_lines(options)?
            .into_iter()
            .map(|line| {
                decode(line, options.binmode, self.as_std_path()).map(Content::into_string)
            })
            .collect()
    }

    /// Read the file as lines of bytes, with no decoding.
    ///
    /// # Errors
    ///
    /// See [`PathValue::lines`].
    pub fn lines_raw(&self, options: &LinesOptions) -> Result<Vec<Vec<u8>>> {
        self.read_lines(options)
    }

    /// Read the file as lines of strict UTF-8.
    ///
    /// # Errors
    ///
    /// See [`PathValue::lines`].
    pub fn lines_utf8(&self, options: &LinesOptions) -> Result<Vec<String>> {
        self.lines(&options.with_binmode(Binmode::Utf8))
    }

    /// The number of lines in the file.
    ///
    /// A final line without a terminator still counts. Nothing is kept in
    /// memory beyond one line at a time.
    ///
    /// # Errors
    ///
    /// See [`PathValue::slurp`].
    pub fn line_count(&self) -> Result<usize> {
        let locked = self.open_shared()?;
        let mut reader = BufReader::new(&*locked);
        let mut line = Vec::new();
        let mut count = 0;
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| Error::io("read", self, e))?;
            if read == 0 {
                return Ok(count);
            }
            count += 1;
        }
    }

    fn read_lines(&self, options: &LinesOptions) -> Result<Vec<Vec<u8>>> {
        OptionsValidator::validate_lines(options)?;

        let locked = self.open_shared()?;
        let mut reader = BufReader::new(&*locked);
        let mut lines = VecDeque::new();

        loop {
            if !options.from_end && options.count.is_some_and(|n| lines.len() >= n) {
                break;
            }

            let mut line = Vec::new();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| Error::io("read", self, e))?;
            if read == 0 {
                break;
            }
            if options.chomp {
                chomp(&mut line);
            }
            lines.push_back(line);

            if options.from_end && options.count.is_some_and(|n| lines.len() > n) {
                lines.pop_front();
            }
        }

        Ok(lines.into())
    }
}

/// Strip one trailing `\r\n`, `\n` or `\r`.
fn chomp(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}
