//! Locked and atomic writes.
//!
//! A replacing write goes through a temp file next to the target:
//! 1. Create the temp file in the target's directory (same filesystem)
//! 2. Lock it exclusively and write the new contents
//! 3. Sync the data to disk
//! 4. Rename it over the target
//!
//! Any failure before the rename leaves the target untouched and removes
//! the temp file. A reader sees either the whole old file or the whole new
//! one. Appends cannot work this way and mutate the file in place under an
//! exclusive lock.

use std::fs::{File, FileTimes, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::{AppendOptions, Binmode, MkpathOptions, ReadOptions, WriteOptions};
use crate::error::{Error, Result};
use crate::file::encoding::{decode, encode};
use crate::file::lock::{LockMode, LockedFile};
use crate::path::resolver::resolve_symlinks;
use crate::path::PathValue;

/// Longest basename used verbatim in a temp file prefix.
const MAX_PREFIX_NAME: usize = 200;

impl PathValue {
    /// Atomically replace the file's contents.
    ///
    /// If this path is a symlink, the file it points to is replaced and the
    /// link is kept. The new file gets default permissions for a new file
    /// (subject to the umask); the old file's permissions are not copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] if the target is a directory,
    /// [`Error::Encoding`] if `data` is not UTF-8 under [`Binmode::Utf8`],
    /// [`Error::SymlinkLoop`] for a looping symlink, and [`Error::Io`] if
    /// any step fails. The target is unchanged after any error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, TempOptions, WriteOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// let file = dir.child(["hello.txt"]);
    /// file.spew("hello", &WriteOptions::default()).unwrap();
    /// assert_eq!(file.slurp_utf8().unwrap(), "hello");
    /// ```
    pub fn spew(&self, data: impl AsRef<[u8]>, options: &WriteOptions) -> Result<()> {
        let bytes = encode(data.as_ref(), options.binmode, self.as_std_path())?;
        self.write_atomic(|file| file.write_all(&bytes))
    }

    /// Atomically replace the file's contents with bytes.
    ///
    /// # Errors
    ///
    /// See [`PathValue::spew`].
    pub fn spew_raw(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.spew(data, &WriteOptions::default().with_binmode(Binmode::Raw))
    }

    /// Atomically replace the file's contents with strict UTF-8.
    ///
    /// # Errors
    ///
    /// See [`PathValue::spew`].
    pub fn spew_utf8(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.spew(data, &WriteOptions::default().with_binmode(Binmode::Utf8))
    }

    /// Run `write` against a locked temp file, then rename it over this path.
    pub(crate) fn write_atomic<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let target = resolve_symlinks(self)?;
        if target.is_dir() {
            return Err(Error::NotAFile {
                path: target.to_path_buf(),
            });
        }
        let dir = target.parent(1);

        let name = target.basename();
        let prefix = if name.len() > MAX_PREFIX_NAME {
            ".tidypath.".to_string()
        } else {
            format!(".{name}.")
        };

        let mut builder = ::tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let mut temp = builder
            .tempfile_in(dir.as_std_path())
            .map_err(|e| Error::io("create", &dir, e))?;

        let handle = temp
            .as_file()
            .try_clone()
            .map_err(|e| Error::io("open", temp.path(), e))?;
        let lock = LockedFile::acquire(handle, temp.path(), LockMode::Exclusive)?;

        write(temp.as_file_mut()).map_err(|e| Error::io("write", temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io("sync", temp.path(), e))?;

        temp.persist(target.as_std_path())
            .map_err(|e| Error::io("rename", &target, e.error))?;
        drop(lock);

        log::debug!("atomically replaced {target}");
        Ok(())
    }

    /// Append to the file, creating it if needed.
    ///
    /// The write happens in place under an exclusive lock. With `truncate`
    /// the file is emptied first, under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAFile`] for a directory, [`Error::Encoding`] if
    /// `data` is not UTF-8 under [`Binmode::Utf8`], and [`Error::Io`] if
    /// opening, locking or writing fails.
    pub fn append(&self, data: impl AsRef<[u8]>, options: &AppendOptions) -> Result<()> {
        if self.is_dir() {
            return Err(Error::NotAFile {
                path: self.to_path_buf(),
            });
        }
        let bytes = encode(data.as_ref(), options.binmode, self.as_std_path())?;

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.as_std_path())
            .map_err(|e| Error::io("open", self, e))?;
        let mut locked = LockedFile::acquire(file, self, LockMode::Exclusive)?;

        if options.truncate {
            locked
                .set_len(0)
                .map_err(|e| Error::io("truncate", self, e))?;
        }
        locked
            .write_all(&bytes)
            .map_err(|e| Error::io("write", self, e))?;
        Ok(())
    }

    /// Append bytes to the file.
    ///
    /// # Errors
    ///
    /// See [`PathValue::append`].
    pub fn append_raw(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.append(data, &AppendOptions::default().with_binmode(Binmode::Raw))
    }

    /// Append strict UTF-8 to the file.
    ///
    /// # Errors
    ///
    /// See [`PathValue::append`].
    pub fn append_utf8(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.append(data, &AppendOptions::default().with_binmode(Binmode::Utf8))
    }

    /// Create the file if it is missing, then set its access and
    /// modification times.
    ///
    /// Times are set to `epoch` seconds since the Unix epoch, or to now. An
    /// existing file's contents are never changed. Returns `self` for
    /// chaining.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or its times
    /// cannot be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempdir, TempOptions};
    ///
    /// let dir = tempdir(&TempOptions::default()).unwrap();
    /// let stamp = dir.child(["stamp"]).touch(Some(0)).unwrap().stat().unwrap();
    /// assert_eq!(stamp.len(), 0);
    /// assert_eq!(stamp.modified().unwrap(), std::time::UNIX_EPOCH);
    /// ```
    pub fn touch(&self, epoch: Option<u64>) -> Result<&Self> {
        let file = if self.is_dir() {
            File::open(self.as_std_path())
        } else {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(self.as_std_path())
        }
        .map_err(|e| Error::io("open", self, e))?;

        let time = match epoch {
            Some(secs) => UNIX_EPOCH + Duration::from_secs(secs),
            None => SystemTime::now(),
        };
        file.set_times(FileTimes::new().set_accessed(time).set_modified(time))
            .map_err(|e| Error::io("utime", self, e))?;
        Ok(self)
    }

    /// Like [`PathValue::touch`], but first create any missing parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PathValue::mkpath`] and [`PathValue::touch`].
    pub fn touchpath(&self, epoch: Option<u64>) -> Result<&Self> {
        self.parent(1).mkpath(&MkpathOptions::default())?;
        self.touch(epoch)
    }

    /// Read the whole file, transform it, and atomically write it back.
    ///
    /// Under [`Binmode::Raw`] the contents are decoded lossily.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PathValue::slurp`] and [`PathValue::spew`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tidypath::{tempfile, TempOptions, WriteOptions};
    ///
    /// let temp = tempfile(&TempOptions::default()).unwrap();
    /// temp.spew("draft", &WriteOptions::default()).unwrap();
    /// temp.edit(|text| *text = text.to_uppercase(), &WriteOptions::default()).unwrap();
    /// assert_eq!(temp.slurp_utf8().unwrap(), "DRAFT");
    /// ```
    pub fn edit<F>(&self, edit: F, options: &WriteOptions) -> Result<()>
    where
        F: FnOnce(&mut String),
    {
        let read = ReadOptions::default().with_binmode(options.binmode);
        let mut text = self.slurp(&read)?.into_string();
        edit(&mut text);
        self.spew(text, options)
    }

    /// Transform the file line by line and atomically write it back.
    ///
    /// Each line is passed with its terminator. Lines are streamed, so the
    /// whole file is never held in memory; the source stays under a shared
    /// lock until the replacement is in place.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PathValue::lines`] and [`PathValue::spew`].
    /// The file is unchanged after any error.
    pub fn edit_lines<F>(&self, mut edit: F, options: &WriteOptions) -> Result<()>
    where
        F: FnMut(&mut String),
    {
        let binmode = options.binmode;
        let path = self.as_std_path();
        let source = self.open_shared()?;
        let mut reader = BufReader::new(&*source);

        // read and decode failures are reported as themselves, not as a
        // failed write to the temp file
        let mut failure = None;
        let result = self.write_atomic(|out| {
            let mut out = BufWriter::new(out);
            loop {
                let next = next_line(&mut reader, binmode, self).and_then(|line| match line {
                    Some(mut line) => {
                        edit(&mut line);
                        encode(line.as_bytes(), binmode, path).map(|b| Some(b.into_owned()))
                    }
                    None => Ok(None),
                });
                match next {
                    Ok(Some(bytes)) => out.write_all(&bytes)?,
                    Ok(None) => break,
                    Err(e) => {
                        failure = Some(e);
                        return Err(io::Error::other("line edit aborted"));
                    }
                }
            }
            out.flush()
        });

        drop(source);
        match (result, failure) {
            (Err(_), Some(error)) => Err(error),
            (result, _) => result,
        }
    }
}

/// Read and decode the next line, or `None` at end of file.
fn next_line(
    reader: &mut impl BufRead,
    binmode: Binmode,
    path: &PathValue,
) -> Result<Option<String>> {
    let mut raw = Vec::new();
    let read = reader
        .read_until(b'\n', &mut raw)
        .map_err(|e| Error::io("read", path, e))?;
    if read == 0 {
        return Ok(None);
    }
    decode(raw, binmode, path.as_std_path()).map(|content| Some(content.into_string()))
}
