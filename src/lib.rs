//! chirpstore - a single-file record store for chirps, users and revoked
//! refresh tokens
//!
//! The whole dataset is one snapshot file. Every operation loads it, and
//! every mutation rewrites it in full under the store's readers-writer lock.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod content;
pub mod errors;
pub mod observability;
pub mod snapshot;
pub mod store;

pub use errors::{Entity, StoreError, StoreResult};
pub use snapshot::{Chirp, ChirpId, Snapshot, User, UserId, UserProfile};
pub use store::{SortOrder, Store};
