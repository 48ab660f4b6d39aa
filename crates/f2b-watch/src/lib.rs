// SPDX-License-Identifier: GPL-2.0-or-later

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Rotation-aware cursor over a monitored log file.
//!
//! Detects rotation (file replaced or truncated in place) via the
//! disjunction of "inode changed" and "first line's hash changed" —
//! inode alone misses in-place truncation on filesystems that recycle
//! inodes across rotation tools, hash alone misses rotation schemes that
//! happen to preserve the first line (e.g. a header).

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("container for {0} is already open; close() it first")]
    AlreadyOpen(PathBuf),
}

/// Opaque fingerprint of a log file's identity: inode plus the MD5 of its
/// first line (raw bytes, before any text decoding). Used only to detect
/// rotation, never as a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    inode: u64,
    first_line_hash: [u8; 16],
}

fn fingerprint(file: &mut File) -> std::io::Result<Fingerprint> {
    let inode = file.metadata()?.ino();
    let mut reader = BufReader::new(&mut *file);
    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line)?;
    let first_line_hash: [u8; 16] = Md5::digest(&first_line).into();
    Ok(Fingerprint {
        inode,
        first_line_hash,
    })
}

/// A rotation-aware cursor over one log file.
///
/// `new()` opens the file once to record its identity and starting
/// position, then closes it; `open()`/`close()` bracket each scan pass so
/// the live handle isn't held between passes.
pub struct FileContainer {
    path: PathBuf,
    fingerprint: Fingerprint,
    /// Byte offset to resume reading from on the next `open()`.
    pos: u64,
    handle: Option<BufReader<File>>,
}

impl FileContainer {
    /// Opens `path` once to record its identity and starting offset. If
    /// `tail` is true, `pos` starts at EOF (only new lines are delivered);
    /// otherwise at 0 (the whole file is replayed).
    pub fn new(path: impl Into<PathBuf>, tail: bool) -> Result<Self, WatchError> {
        let path = path.into();
        let mut file = File::open(&path).map_err(|source| WatchError::Open {
            path: path.clone(),
            source,
        })?;
        let fingerprint = fingerprint(&mut file).map_err(|source| WatchError::Read {
            path: path.clone(),
            source,
        })?;
        let pos = if tail {
            file.metadata()
                .map_err(|source| WatchError::Read {
                    path: path.clone(),
                    source,
                })?
                .len()
        } else {
            0
        };
        Ok(Self {
            path,
            fingerprint,
            pos,
            handle: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Reopens the file for a scan pass. Rust's `std::fs::File` already
    /// opens with `O_CLOEXEC` set, satisfying the close-on-exec guarantee
    /// without an explicit `fcntl` call.
    ///
    /// Recomputes the fingerprint; if it differs from the stored one,
    /// rotation is assumed and `pos` resets to 0 before seeking. A file
    /// shorter than `pos` (truncation that happens to preserve inode and
    /// first line) is also treated as rotation.
    pub fn open(&mut self) -> Result<(), WatchError> {
        if self.handle.is_some() {
            return Err(WatchError::AlreadyOpen(self.path.clone()));
        }
        let mut file = File::open(&self.path).map_err(|source| WatchError::Open {
            path: self.path.clone(),
            source,
        })?;
        let new_fingerprint = fingerprint(&mut file).map_err(|source| WatchError::Read {
            path: self.path.clone(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| WatchError::Read {
                path: self.path.clone(),
                source,
            })?
            .len();

        if new_fingerprint != self.fingerprint || len < self.pos {
            tracing::debug!(path = %self.path.display(), "log rotation detected");
            self.fingerprint = new_fingerprint;
            self.pos = 0;
        }

        file.seek(SeekFrom::Start(self.pos))
            .map_err(|source| WatchError::Read {
                path: self.path.clone(),
                source,
            })?;
        self.handle = Some(BufReader::new(file));
        Ok(())
    }

    /// Reads the next newline-terminated line. Returns an empty string at
    /// EOF (never blocks, never errors on EOF). Bytes are handed back raw;
    /// callers decode as UTF-8 with fallback.
    pub fn readline(&mut self) -> Result<String, WatchError> {
        let Some(reader) = self.handle.as_mut() else {
            return Ok(String::new());
        };
        let mut buf = Vec::new();
        let n = reader.read_until(b'\n', &mut buf).map_err(|source| WatchError::Read {
            path: self.path.clone(),
            source,
        })?;
        if n == 0 {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Records the current byte offset and releases the handle.
    pub fn close(&mut self) {
        if let Some(mut reader) = self.handle.take() {
            if let Ok(pos) = reader.stream_position() {
                self.pos = pos;
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
