//! Toolpath file snapshots
//!
//! A [`Snapshot`] is an immutable copy of the file contents that every
//! stream pass borrows from. [`ToolpathSource`] watches the file's
//! modification time and swaps in a new snapshot when it moves forward,
//! handing the previous one back so correspondence can run while both are
//! alive.

use gcodeview_core::constants::LARGE_FILE_BYTES;
use gcodeview_core::{Result, SourceError};
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Immutable, cheaply clonable file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Arc<[u8]>,
}

impl Snapshot {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for Snapshot {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// A watched G-code file and its current snapshot
#[derive(Debug)]
pub struct ToolpathSource {
    path: PathBuf,
    snapshot: Snapshot,
    modified: Option<SystemTime>,
}

fn read_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Read {
        path: path.to_path_buf(),
        source,
    }
}

impl ToolpathSource {
    /// Open and read `path`
    ///
    /// # Errors
    /// Returns error if the file does not exist, is not a regular file, or
    /// cannot be read
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(SourceError::NotFound { path }.into());
        }
        if !path.is_file() {
            return Err(SourceError::NotAFile { path }.into());
        }

        let (snapshot, modified) = Self::read(&path)?;
        debug!(
            "Opened {} ({} bytes)",
            path.display(),
            snapshot.as_bytes().len()
        );

        Ok(Self {
            path,
            snapshot,
            modified,
        })
    }

    /// In-memory source that never reloads
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            path: PathBuf::new(),
            snapshot: Snapshot::new(bytes),
            modified: None,
        }
    }

    fn read(path: &Path) -> Result<(Snapshot, Option<SystemTime>)> {
        let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
        if metadata.len() > LARGE_FILE_BYTES {
            warn!(
                "Reading very large file ({}MB) into memory",
                metadata.len() / (1024 * 1024)
            );
        }

        let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
        Ok((Snapshot::new(bytes), metadata.modified().ok()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Re-read the file if its modification time is newer than the snapshot's.
    ///
    /// Returns the previous snapshot when a reload happened. The caller owns
    /// it until correspondence against the new snapshot is done.
    pub fn poll(&mut self) -> Result<Option<Snapshot>> {
        if self.path.as_os_str().is_empty() {
            return Ok(None);
        }

        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| read_error(&self.path, e))?;

        let newer = match self.modified {
            Some(previous) => modified > previous,
            None => true,
        };
        if !newer {
            return Ok(None);
        }

        let (snapshot, modified) = Self::read(&self.path)?;
        debug!(
            "Reloaded {} ({} bytes)",
            self.path.display(),
            snapshot.as_bytes().len()
        );
        self.modified = modified;
        Ok(Some(std::mem::replace(&mut self.snapshot, snapshot)))
    }
}
