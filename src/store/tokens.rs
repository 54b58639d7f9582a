//! Refresh token revocation
//!
//! Revocation is one-way. Entries are never expired or collected, so the
//! table grows with every revoked token.

use chrono::Utc;

use super::Store;
use crate::errors::{StoreError, StoreResult};
use crate::observability::Logger;

impl Store {
    /// Returns whether `token` has been revoked
    pub fn is_token_revoked(&self, token: &str) -> StoreResult<bool> {
        self.read(|snapshot| Ok(snapshot.revoked_tokens.contains_key(token)))
    }

    /// Marks `token` as revoked, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRevoked` if the token is already in the table.
    pub fn revoke_token(&self, token: &str) -> StoreResult<()> {
        self.mutate(|snapshot| {
            if snapshot.revoked_tokens.contains_key(token) {
                return Err(StoreError::AlreadyRevoked);
            }
            snapshot.revoked_tokens.insert(token.to_string(), Utc::now());
            Ok(())
        })?;

        Logger::info("TOKEN_REVOKED", &[]);

        Ok(())
    }
}
