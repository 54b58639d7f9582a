//! Snapshot file codec
//!
//! The file holds one JSON envelope:
//!
//! ```text
//! {"format_version":1,"checksum":<crc32>,"snapshot":{...}}
//! ```
//!
//! The checksum covers the compact JSON encoding of `snapshot`. Every
//! `store` truncates the file and rewrites the whole envelope; there are no
//! incremental writes. `SnapshotFile` does no locking of its own, callers
//! reach it through the store's `RwLock`.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::checksum::{compute_checksum, format_checksum};
use super::record::Snapshot;
use crate::errors::{StoreError, StoreResult};
use crate::observability::Logger;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format_version: u32,
    checksum: u32,
    snapshot: &'a Snapshot,
}

#[derive(Deserialize)]
struct Envelope {
    format_version: u32,
    checksum: u32,
    snapshot: Snapshot,
}

/// Handle to the snapshot file at a fixed path
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Ensures a snapshot file exists at `path`.
    ///
    /// If nothing exists there, creates the file and writes an empty
    /// snapshot. An existing file is left untouched. Parent directories are
    /// never created.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the file cannot be created or written.
    pub fn initialize(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let file = Self { path: path.into() };

        if exists(&file.path) {
            return Ok(file);
        }

        let handle = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file.path)
        {
            Ok(handle) => handle,
            // Lost a creation race; the winner writes the empty snapshot
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(file),
            Err(e) => {
                return Err(StoreError::unavailable(
                    format!("Failed to create snapshot file: {}", file.path.display()),
                    e,
                ))
            }
        };

        file.populate_new(handle)?;

        Logger::info(
            "SNAPSHOT_INITIALIZED",
            &[("path", file.path.display().to_string().as_str())],
        );

        Ok(file)
    }

    /// Returns the path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the full snapshot.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the file cannot be opened or read
    /// - `CorruptState` if the contents are not a valid snapshot
    pub fn load(&self) -> StoreResult<Snapshot> {
        let mut file = File::open(&self.path).map_err(|e| {
            StoreError::unavailable(
                format!("Failed to open snapshot file: {}", self.path.display()),
                e,
            )
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            StoreError::unavailable(
                format!("Failed to read snapshot file: {}", self.path.display()),
                e,
            )
        })?;

        decode(&bytes).map_err(|e| {
            Logger::error(
                "SNAPSHOT_CORRUPT",
                &[
                    ("path", self.path.display().to_string().as_str()),
                    ("reason", e.to_string().as_str()),
                ],
            );
            e
        })
    }

    /// Encodes the full snapshot and overwrites the file with it.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the file cannot be opened, written or
    /// synced.
    pub fn store(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let bytes = encode(snapshot)?;

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                StoreError::unavailable(
                    format!("Failed to open snapshot file for writing: {}", self.path.display()),
                    e,
                )
            })?;

        self.write_synced(&mut file, &bytes)
    }

    /// Writes an empty snapshot into a file this process just created.
    ///
    /// On failure the file is removed so a later `initialize` starts over
    /// instead of finding an empty, undecodable file.
    fn populate_new(&self, mut handle: File) -> StoreResult<()> {
        let result = encode(&Snapshot::empty())
            .and_then(|bytes| self.write_synced(&mut handle, &bytes));

        if result.is_err() {
            drop(handle);
            let _ = fs::remove_file(&self.path);
        }

        result
    }

    fn write_synced(&self, file: &mut File, bytes: &[u8]) -> StoreResult<()> {
        file.write_all(bytes).map_err(|e| {
            StoreError::unavailable(
                format!("Failed to write snapshot file: {}", self.path.display()),
                e,
            )
        })?;

        file.sync_all().map_err(|e| {
            StoreError::unavailable(
                format!("fsync failed for snapshot file: {}", self.path.display()),
                e,
            )
        })?;

        Ok(())
    }
}

/// Encodes a snapshot into its on-disk envelope
pub fn encode(snapshot: &Snapshot) -> StoreResult<Vec<u8>> {
    let body = serde_json::to_vec(snapshot)
        .map_err(|e| StoreError::corrupt(format!("Failed to encode snapshot: {}", e)))?;

    let envelope = EnvelopeRef {
        format_version: FORMAT_VERSION,
        checksum: compute_checksum(&body),
        snapshot,
    };

    serde_json::to_vec(&envelope)
        .map_err(|e| StoreError::corrupt(format!("Failed to encode snapshot envelope: {}", e)))
}

/// Decodes and verifies an on-disk envelope
pub fn decode(bytes: &[u8]) -> StoreResult<Snapshot> {
    if bytes.is_empty() {
        return Err(StoreError::corrupt("snapshot file is empty"));
    }

    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| StoreError::corrupt(format!("Failed to decode snapshot: {}", e)))?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(StoreError::corrupt(format!(
            "unsupported format_version {}",
            envelope.format_version
        )));
    }

    let body = serde_json::to_vec(&envelope.snapshot)
        .map_err(|e| StoreError::corrupt(format!("Failed to re-encode snapshot: {}", e)))?;
    let actual = compute_checksum(&body);
    if actual != envelope.checksum {
        return Err(StoreError::corrupt(format!(
            "checksum mismatch: expected {}, found {}",
            format_checksum(envelope.checksum),
            format_checksum(actual)
        )));
    }

    envelope.snapshot.validate()?;

    Ok(envelope.snapshot)
}

/// Anything other than a definite "not found" counts as existing, so an
/// unreadable path is never overwritten by `initialize`.
pub fn exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}
