//! # Password Hashing
//!
//! The store treats password hashing as a pluggable capability. The
//! default implementation is Argon2id with a random salt per hash; stored
//! values are PHC strings, so the cost parameters travel with each hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::errors::{StoreError, StoreResult};

/// Slow, salted one-way password hashing
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into an opaque stored value
    fn hash(&self, password: &str) -> StoreResult<String>;

    /// Check a candidate password against a stored value.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for stored
    /// values that cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> StoreResult<bool>;
}

/// Argon2id hasher
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Hasher {
    /// Hasher with explicit memory (KiB) and iteration costs
    pub fn with_cost(memory_kib: u32, iterations: u32) -> StoreResult<Self> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|_| StoreError::HashingFailed)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> StoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| StoreError::HashingFailed)
    }

    fn verify(&self, password: &str, hash: &str) -> StoreResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|_| StoreError::corrupt("stored password hash is malformed"))?;

        // Constant-time comparison happens inside argon2
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
