//! Store for chirpstore
//!
//! A `Store` owns the snapshot file behind a readers-writer lock. Every
//! operation reconstructs the snapshot from disk, and every mutation writes
//! the whole snapshot back before returning. No snapshot is cached between
//! calls.
//!
//! # Locking
//!
//! - Reads hold the shared lock for the duration of `load`.
//! - Mutations hold the exclusive lock across load, mutate and store, so two
//!   concurrent mutations can never allocate the same id or lose each
//!   other's writes.
//! - Password hashing runs before the exclusive lock is taken.

mod chirps;
mod tokens;
mod users;

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::auth::{Argon2Hasher, CredentialHasher};
use crate::errors::{StoreError, StoreResult};
use crate::snapshot::{Snapshot, SnapshotFile};

pub use chirps::SortOrder;
pub use users::normalize_email;

/// Handle to a file-backed record store
pub struct Store {
    path: PathBuf,
    file: RwLock<SnapshotFile>,
    hasher: Box<dyn CredentialHasher>,
}

impl Store {
    /// Opens the store at `path` with the default Argon2id hasher,
    /// creating an empty snapshot file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with_hasher(path, Argon2Hasher::default())
    }

    /// Opens the store at `path` with a caller-supplied hasher
    pub fn open_with_hasher(
        path: impl Into<PathBuf>,
        hasher: impl CredentialHasher + 'static,
    ) -> StoreResult<Self> {
        let file = SnapshotFile::initialize(path)?;

        Ok(Self {
            path: file.path().to_path_buf(),
            file: RwLock::new(file),
            hasher: Box::new(hasher),
        })
    }

    /// Returns the path of the backing snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the current snapshot under the shared lock
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        self.read(|snapshot| Ok(snapshot))
    }

    /// Runs `f` against a freshly loaded snapshot under the shared lock
    fn read<T>(&self, f: impl FnOnce(Snapshot) -> StoreResult<T>) -> StoreResult<T> {
        let file = self.file.read().map_err(|_| StoreError::lock_poisoned())?;
        let snapshot = file.load()?;
        drop(file);
        f(snapshot)
    }

    /// Loads, applies `f` and stores the result under the exclusive lock.
    ///
    /// If `f` fails nothing is written.
    fn mutate<T>(&self, f: impl FnOnce(&mut Snapshot) -> StoreResult<T>) -> StoreResult<T> {
        let file = self.file.write().map_err(|_| StoreError::lock_poisoned())?;
        let mut snapshot = file.load()?;
        let value = f(&mut snapshot)?;
        file.store(&snapshot)?;
        Ok(value)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}
