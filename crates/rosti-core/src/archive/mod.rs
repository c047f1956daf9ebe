//! Project archive construction
//!
//! Packs a file or a directory tree into an uncompressed tar stream written
//! straight to disk. Entries follow a depth-first walk with children in
//! lexical order, the same order on every run for an unchanged tree.

use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Write `source` into a tar archive at `destination`.
///
/// The destination is created (or truncated) before anything else happens.
/// A directory source is self-rooted: the directory itself is the first
/// entry and every other path is prefixed with its base name. A file source
/// yields a single entry named after the file. The destination is never
/// archived into itself, even when it lies inside the source tree.
///
/// A source that cannot be stat'ed is not an error: an empty archive is
/// left at the destination and `Ok(())` is returned.
///
/// The first failure while reading the tree or writing the archive aborts
/// the walk. A file whose size changes between stat and read is such a
/// failure. The archive is finished and flushed in every case, so an error
/// leaves a truncated but well-formed tar behind.
pub fn build_archive(source: &Path, destination: &Path) -> Result<()> {
    let file = File::create(destination).map_err(|e| Error::io(destination, e))?;
    let target = Target {
        path: destination,
        canonical: fs::canonicalize(destination).ok(),
    };
    let mut builder = tar::Builder::new(BufWriter::new(file));

    let walked = match fs::metadata(source) {
        Ok(meta) => append_source(&mut builder, source, &meta, &target),
        Err(e) => {
            warn!(
                source = %source.display(),
                error = %e,
                "archive source not found, writing empty archive"
            );
            Ok(())
        }
    };

    let finished = builder
        .into_inner()
        .and_then(|mut writer| writer.flush())
        .map_err(|e| Error::io(destination, e));

    walked.and(finished)
}

/// The archive being written
struct Target<'a> {
    path: &'a Path,
    canonical: Option<PathBuf>,
}

impl Target<'_> {
    fn is_self(&self, path: &Path, meta: &Metadata) -> bool {
        let Some(canonical) = &self.canonical else {
            return false;
        };
        !meta.file_type().is_symlink()
            && path.file_name() == canonical.file_name()
            && fs::canonicalize(path).is_ok_and(|p| p == *canonical)
    }
}

fn append_source<W: Write>(
    builder: &mut tar::Builder<W>,
    source: &Path,
    meta: &Metadata,
    target: &Target<'_>,
) -> Result<()> {
    let name = entry_name(source)?;

    if meta.is_dir() {
        debug!(source = %source.display(), root = %name.display(), "archiving directory");
        append_entry(builder, source, meta, &name, target)?;
        append_dir(builder, source, &name, target)
    } else if target.is_self(source, meta) {
        warn!(source = %source.display(), "source is the archive itself, nothing to add");
        Ok(())
    } else {
        debug!(source = %source.display(), "archiving single file");
        append_entry(builder, source, meta, &name, target)
    }
}

fn append_dir<W: Write>(
    builder: &mut tar::Builder<W>,
    dir: &Path,
    prefix: &Path,
    target: &Target<'_>,
) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .and_then(|rd| rd.collect::<io::Result<Vec<_>>>())
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let meta = fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if target.is_self(&path, &meta) {
            debug!(path = %path.display(), "skipping the archive being written");
            continue;
        }
        let name = prefix.join(entry.file_name());

        append_entry(builder, &path, &meta, &name, target)?;
        if meta.is_dir() {
            append_dir(builder, &path, &name, target)?;
        }
    }

    Ok(())
}

/// Append one node: header first, then content for regular files
fn append_entry<W: Write>(
    builder: &mut tar::Builder<W>,
    path: &Path,
    meta: &Metadata,
    name: &Path,
    target: &Target<'_>,
) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_metadata(meta);

    if meta.file_type().is_symlink() {
        let link = fs::read_link(path).map_err(|e| Error::io(path, e))?;
        header.set_size(0);
        return builder
            .append_link(&mut header, name, link)
            .map_err(|e| Error::io(target.path, e));
    }

    if meta.is_dir() {
        header.set_size(0);
        return builder
            .append_data(&mut header, name, io::empty())
            .map_err(|e| Error::io(target.path, e));
    }

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = SizedReader::new(file, meta.len());
    builder
        .append_data(&mut header, name, &mut reader)
        .map_err(|e| {
            if reader.failed {
                Error::io(path, e)
            } else {
                Error::io(target.path, e)
            }
        })
}

/// Reads exactly the number of bytes recorded in the entry header.
///
/// Running short or finding more data than expected is an error, so a file
/// that changes while it is archived cannot desync the tar stream.
struct SizedReader<R> {
    inner: R,
    remaining: u64,
    failed: bool,
}

impl<R: Read> SizedReader<R> {
    fn new(inner: R, len: u64) -> Self {
        Self {
            inner,
            remaining: len,
            failed: false,
        }
    }

    fn fail(&mut self, error: io::Error) -> io::Error {
        if error.kind() != io::ErrorKind::Interrupted {
            self.failed = true;
        }
        error
    }
}

impl<R: Read> Read for SizedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.remaining == 0 {
            let mut extra = [0u8; 1];
            return match self.inner.read(&mut extra) {
                Ok(0) => Ok(0),
                Ok(_) => Err(self.fail(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "file grew while it was being archived",
                ))),
                Err(e) => Err(self.fail(e)),
            };
        }

        let max = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let n = match self.inner.read(&mut buf[..max]) {
            Ok(n) => n,
            Err(e) => return Err(self.fail(e)),
        };
        if n == 0 {
            let missing = self.remaining;
            return Err(self.fail(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file shrank while it was being archived ({missing} bytes missing)"),
            )));
        }

        self.remaining -= n as u64;
        Ok(n)
    }
}

/// Top-level entry name: the base name of the source.
///
/// Paths such as `.` have no file name of their own, so those are resolved
/// first.
fn entry_name(source: &Path) -> Result<PathBuf> {
    if let Some(name) = source.file_name() {
        return Ok(PathBuf::from(name));
    }

    let resolved = fs::canonicalize(source).map_err(|e| Error::io(source, e))?;
    Ok(resolved
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
