//! Snapshot persistence for chirpstore
//!
//! The entire state lives in one file holding one serialized `Snapshot`.
//!
//! # Design Principles
//!
//! - Whole-file rewrite on every store (truncate, write, fsync)
//! - Checksum verified on every load
//! - Corruption is reported, never repaired
//! - Initialization never overwrites an existing file

pub mod checksum;
mod file;
mod record;

pub use file::{decode, encode, exists, SnapshotFile, FORMAT_VERSION};
pub use record::{Chirp, ChirpId, Snapshot, User, UserId, UserProfile};
