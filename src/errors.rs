//! # Store Errors
//!
//! Error taxonomy shared by the snapshot codec and the store operations.
//! Every public operation surfaces exactly one of these; nothing is retried
//! internally.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Entity kind referenced by a `NotFound` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Chirp,
    User,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Chirp => write!(f, "Chirp"),
            Entity::User => write!(f, "User"),
        }
    }
}

/// Storage and domain errors
#[derive(Debug, Error)]
pub enum StoreError {
    // ==================
    // Persistence Errors
    // ==================

    /// Snapshot file cannot be opened, created or written
    #[error("Storage unavailable: {message}")]
    StorageUnavailable {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Snapshot file does not decode into a valid snapshot
    #[error("Corrupt state: {0}")]
    CorruptState(String),

    // ==================
    // Domain Errors
    // ==================

    /// Referenced chirp or user does not exist
    #[error("{0} not found")]
    NotFound(Entity),

    /// Normalized e-mail is already registered
    #[error("This user already exists")]
    AlreadyExists,

    /// Requesting user does not own the chirp
    #[error("This action is not authorized")]
    Forbidden,

    /// Token is already present in the revocation table
    #[error("Token is already revoked")]
    AlreadyRevoked,

    /// Password does not match the stored hash
    #[error("Invalid credentials")]
    AuthFailed,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,
}

impl StoreError {
    /// Create a storage error from an I/O failure
    pub fn unavailable(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            message: message.into(),
            source,
        }
    }

    /// Create a storage error for a poisoned lock
    pub fn lock_poisoned() -> Self {
        Self::unavailable(
            "Snapshot lock poisoned",
            io::Error::new(io::ErrorKind::Other, "lock poisoned"),
        )
    }

    /// Create a corruption error
    pub fn corrupt(reason: impl Into<String>) -> Self {
        StoreError::CorruptState(reason.into())
    }

    /// Returns the stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::StorageUnavailable { .. } => "STORAGE_UNAVAILABLE",
            StoreError::CorruptState(_) => "CORRUPT_STATE",
            StoreError::NotFound(Entity::Chirp) => "CHIRP_NOT_FOUND",
            StoreError::NotFound(Entity::User) => "USER_NOT_FOUND",
            StoreError::AlreadyExists => "USER_ALREADY_EXISTS",
            StoreError::Forbidden => "FORBIDDEN",
            StoreError::AlreadyRevoked => "TOKEN_ALREADY_REVOKED",
            StoreError::AuthFailed => "AUTH_FAILED",
            StoreError::HashingFailed => "HASHING_FAILED",
        }
    }

    /// Returns the HTTP status code a transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            StoreError::AuthFailed => 401,

            // 403 Forbidden
            StoreError::Forbidden => 403,

            // 404 Not Found
            StoreError::NotFound(_) => 404,

            // 409 Conflict
            StoreError::AlreadyExists => 409,
            StoreError::AlreadyRevoked => 409,

            // 500 Internal Server Error
            StoreError::StorageUnavailable { .. } => 500,
            StoreError::CorruptState(_) => 500,
            StoreError::HashingFailed => 500,
        }
    }

    /// Returns whether the on-disk state itself is unusable
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::CorruptState(_))
    }

    /// Returns whether this error is caused by the request rather than the store
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
