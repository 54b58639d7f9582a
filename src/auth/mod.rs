//! # Auth
//!
//! Credential hashing used by the user operations of the store.

pub mod crypto;

pub use crypto::{Argon2Hasher, CredentialHasher};
