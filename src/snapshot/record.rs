//! Snapshot record types
//!
//! The whole persisted state is one `Snapshot` value. Maps are ordered so
//! that encoding the same snapshot twice yields identical bytes.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, StoreResult};

/// Chirp identifier, allocated by the store
pub type ChirpId = u64;

/// User identifier, allocated by the store
pub type UserId = u64;

/// A short text post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: ChirpId,
    /// Not validated against `users` at write time
    pub author_id: UserId,
    pub body: String,
}

/// A registered user as persisted in the snapshot
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Normalized (trimmed, lower-cased) e-mail, unique across users
    pub email: String,

    /// Argon2id PHC string. Only ever written to the snapshot file.
    pub password_hash: String,

    /// One-way flag set by `upgrade_user`
    #[serde(default)]
    pub is_upgraded: bool,
}

impl User {
    /// The view of this user that may leave the store
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            is_upgraded: self.is_upgraded,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("is_upgraded", &self.is_upgraded)
            .finish()
    }
}

/// Externally visible user record (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub is_upgraded: bool,
}

/// The entire persisted state at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub next_chirp_id: ChirpId,
    pub next_user_id: UserId,
    pub chirps: BTreeMap<ChirpId, Chirp>,
    pub users: BTreeMap<UserId, User>,
    /// Presence means revoked; the timestamp is informational
    pub revoked_tokens: BTreeMap<String, DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl Snapshot {
    /// A fresh snapshot: both counters at 1, all maps empty
    pub fn empty() -> Self {
        Self {
            next_chirp_id: 1,
            next_user_id: 1,
            chirps: BTreeMap::new(),
            users: BTreeMap::new(),
            revoked_tokens: BTreeMap::new(),
        }
    }

    /// Checks the structural invariants a decoded snapshot must satisfy.
    ///
    /// Counters start at 1 and stay above every allocated id, and every
    /// record sits under its own id.
    pub fn validate(&self) -> StoreResult<()> {
        if self.next_chirp_id == 0 || self.next_user_id == 0 {
            return Err(StoreError::corrupt("id counters must start at 1"));
        }

        for (key, chirp) in &self.chirps {
            if *key != chirp.id {
                return Err(StoreError::corrupt(format!(
                    "chirp stored under key {} has id {}",
                    key, chirp.id
                )));
            }
            if chirp.id >= self.next_chirp_id {
                return Err(StoreError::corrupt(format!(
                    "chirp id {} is not below next_chirp_id {}",
                    chirp.id, self.next_chirp_id
                )));
            }
        }

        for (key, user) in &self.users {
            if *key != user.id {
                return Err(StoreError::corrupt(format!(
                    "user stored under key {} has id {}",
                    key, user.id
                )));
            }
            if user.id >= self.next_user_id {
                return Err(StoreError::corrupt(format!(
                    "user id {} is not below next_user_id {}",
                    user.id, self.next_user_id
                )));
            }
        }

        Ok(())
    }

    /// Allocates the next chirp id.
    ///
    /// Returns `CorruptState` once the counter is exhausted; the counter is
    /// left unchanged.
    pub(crate) fn allocate_chirp_id(&mut self) -> StoreResult<ChirpId> {
        let id = self.next_chirp_id;
        self.next_chirp_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::corrupt("next_chirp_id exhausted"))?;
        Ok(id)
    }

    /// Allocates the next user id
    pub(crate) fn allocate_user_id(&mut self) -> StoreResult<UserId> {
        let id = self.next_user_id;
        self.next_user_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::corrupt("next_user_id exhausted"))?;
        Ok(id)
    }

    /// Linear scan for a user with the given normalized e-mail
    pub(crate) fn find_user_by_email(&self, normalized_email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == normalized_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: "$argon2id$v=19$fake".to_string(),
            is_upgraded: false,
        }
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = Snapshot::empty();
        assert_eq!(snapshot.next_chirp_id, 1);
        assert_eq!(snapshot.next_user_id, 1);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_counter_behind_ids_is_corrupt() {
        let mut snapshot = Snapshot::empty();
        snapshot.chirps.insert(
            3,
            Chirp {
                id: 3,
                author_id: 1,
                body: "hi".to_string(),
            },
        );
        snapshot.next_chirp_id = 3;
        assert!(matches!(snapshot.validate(), Err(StoreError::CorruptState(_))));
    }

    #[test]
    fn test_mismatched_key_is_corrupt() {
        let mut snapshot = Snapshot::empty();
        snapshot.users.insert(1, user(2, "a@b.c"));
        snapshot.next_user_id = 5;
        assert!(matches!(snapshot.validate(), Err(StoreError::CorruptState(_))));
    }

    #[test]
    fn test_allocation_is_monotonic() {
        let mut snapshot = Snapshot::empty();
        assert_eq!(snapshot.allocate_chirp_id().unwrap(), 1);
        assert_eq!(snapshot.allocate_chirp_id().unwrap(), 2);
        assert_eq!(snapshot.allocate_user_id().unwrap(), 1);
        assert_eq!(snapshot.next_chirp_id, 3);
        assert_eq!(snapshot.next_user_id, 2);
    }

    #[test]
    fn test_exhausted_counters_are_reported() {
        let mut snapshot = Snapshot::empty();
        snapshot.next_chirp_id = u64::MAX;
        snapshot.next_user_id = u64::MAX;
        assert!(snapshot.validate().is_ok());

        assert!(matches!(
            snapshot.allocate_chirp_id(),
            Err(StoreError::CorruptState(_))
        ));
        assert!(matches!(
            snapshot.allocate_user_id(),
            Err(StoreError::CorruptState(_))
        ));
        assert_eq!(snapshot.next_chirp_id, u64::MAX);
        assert_eq!(snapshot.next_user_id, u64::MAX);
    }

    #[test]
    fn test_profile_and_debug_omit_password_hash() {
        let u = user(1, "test@example.com");

        let json = serde_json::to_string(&u.profile()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains(&u.password_hash));

        let debug = format!("{:?}", u);
        assert!(!debug.contains(&u.password_hash));
    }
}
