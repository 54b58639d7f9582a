//! User operations
//!
//! E-mails are normalized (trimmed, lower-cased) before every comparison
//! and before they are stored, and at most one user holds a given
//! normalized e-mail.

use super::Store;
use crate::errors::{Entity, StoreError, StoreResult};
use crate::observability::Logger;
use crate::snapshot::{User, UserId};

/// Trims surrounding whitespace and lower-cases an e-mail address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Store {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the normalized e-mail is taken
    /// - `HashingFailed` if the password cannot be hashed
    pub fn create_user(&self, email: &str, password: &str) -> StoreResult<User> {
        let email = normalize_email(email);
        let password_hash = self.hasher.hash(password)?;

        let user = self.mutate(|snapshot| {
            if snapshot.find_user_by_email(&email).is_some() {
                return Err(StoreError::AlreadyExists);
            }

            let user = User {
                id: snapshot.allocate_user_id()?,
                email,
                password_hash,
                is_upgraded: false,
            };
            snapshot.users.insert(user.id, user.clone());
            Ok(user)
        })?;

        Logger::info("USER_CREATED", &[("user_id", user.id.to_string().as_str())]);

        Ok(user)
    }

    /// Looks up a user by e-mail, ignoring case and surrounding whitespace
    pub fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
        let email = normalize_email(email);

        self.read(|snapshot| {
            snapshot
                .find_user_by_email(&email)
                .cloned()
                .ok_or(StoreError::NotFound(Entity::User))
        })
    }

    /// Looks up a user by id
    pub fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.read(|mut snapshot| {
            snapshot
                .users
                .remove(&id)
                .ok_or(StoreError::NotFound(Entity::User))
        })
    }

    /// Replaces a user's e-mail and password, keeping id and upgrade flag.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this id
    /// - `AlreadyExists` if another user holds the new normalized e-mail
    pub fn update_user_credentials(
        &self,
        id: UserId,
        new_email: &str,
        new_password: &str,
    ) -> StoreResult<User> {
        let email = normalize_email(new_email);
        let password_hash = self.hasher.hash(new_password)?;

        let user = self.mutate(|snapshot| {
            if !snapshot.users.contains_key(&id) {
                return Err(StoreError::NotFound(Entity::User));
            }

            if let Some(other) = snapshot.find_user_by_email(&email) {
                if other.id != id {
                    return Err(StoreError::AlreadyExists);
                }
            }

            let user = snapshot
                .users
                .get_mut(&id)
                .ok_or(StoreError::NotFound(Entity::User))?;
            user.email = email;
            user.password_hash = password_hash;
            Ok(user.clone())
        })?;

        Logger::info("USER_UPDATED", &[("user_id", id.to_string().as_str())]);

        Ok(user)
    }

    /// Checks a candidate password for the user with this e-mail.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no user has this e-mail
    /// - `AuthFailed` if the password does not match
    pub fn verify_password(&self, email: &str, candidate: &str) -> StoreResult<User> {
        let user = self.get_user_by_email(email)?;

        if self.hasher.verify(candidate, &user.password_hash)? {
            Ok(user)
        } else {
            Logger::warn("AUTH_FAILED", &[("user_id", user.id.to_string().as_str())]);
            Err(StoreError::AuthFailed)
        }
    }

    /// Sets the upgrade flag. Upgrading twice is not an error.
    pub fn upgrade_user(&self, id: UserId) -> StoreResult<()> {
        self.mutate(|snapshot| {
            let user = snapshot
                .users
                .get_mut(&id)
                .ok_or(StoreError::NotFound(Entity::User))?;
            user.is_upgraded = true;
            Ok(())
        })?;

        Logger::info("USER_UPGRADED", &[("user_id", id.to_string().as_str())]);

        Ok(())
    }
}
