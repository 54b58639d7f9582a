//! Store Invariant Tests
//!
//! - Chirp and user ids only increase and are never reused
//! - At most one user per normalized e-mail
//! - Deletion is gated on authorship and checked before mutation
//! - Revocation is one-way and re-revoking is rejected
//! - Upgrading is idempotent

use chirpstore::auth::Argon2Hasher;
use chirpstore::{Entity, SortOrder, Store, StoreError};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn open_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let hasher = Argon2Hasher::with_cost(1024, 1).unwrap();
    let store = Store::open_with_hasher(dir.path().join("database.json"), hasher).unwrap();
    (dir, store)
}

// =============================================================================
// Id allocation
// =============================================================================

#[test]
fn test_chirp_ids_strictly_increase_across_deletes() {
    let (_dir, store) = open_store();
    let mut ids = Vec::new();

    for round in 0..5 {
        let chirp = store.create_chirp(1, format!("chirp {}", round)).unwrap();
        ids.push(chirp.id);
        if round % 2 == 0 {
            store.delete_chirp(chirp.id, 1).unwrap();
        }
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    // Deleting the newest chirp does not roll the counter back
    store.delete_chirp(5, 1).ok();
    assert_eq!(store.create_chirp(1, "after").unwrap().id, 6);
}

#[test]
fn test_user_ids_not_consumed_by_rejected_registration() {
    let (_dir, store) = open_store();
    assert_eq!(store.create_user("a@example.com", "pw").unwrap().id, 1);
    assert!(store.create_user("A@example.com", "pw").is_err());
    assert_eq!(store.create_user("b@example.com", "pw").unwrap().id, 2);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_email_normalization() {
    let (_dir, store) = open_store();

    let first = store.create_user("Alice@Example.com ", "secret").unwrap();
    assert!(matches!(
        store.create_user("alice@example.com", "other"),
        Err(StoreError::AlreadyExists)
    ));

    let found = store.get_user_by_email("ALICE@EXAMPLE.COM").unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.email, "alice@example.com");
}

#[test]
fn test_scenario_first_chirp_and_author_filter() {
    let (_dir, store) = open_store();

    let chirp = store.create_chirp(7, "hello").unwrap();
    assert_eq!((chirp.id, chirp.author_id, chirp.body.as_str()), (1, 7, "hello"));

    assert_eq!(
        store.list_chirps(Some(7), SortOrder::Asc).unwrap(),
        vec![chirp]
    );
    assert!(store.list_chirps(Some(99), SortOrder::Asc).unwrap().is_empty());
}

#[test]
fn test_scenario_upgrade() {
    let (_dir, store) = open_store();

    assert!(matches!(
        store.upgrade_user(42),
        Err(StoreError::NotFound(Entity::User))
    ));

    let user = store.create_user("u@example.com", "pw").unwrap();
    assert!(!user.is_upgraded);
    store.upgrade_user(user.id).unwrap();
    store.upgrade_user(user.id).unwrap();
    assert!(store.get_user(user.id).unwrap().is_upgraded);
}

// =============================================================================
// Authorization
// =============================================================================

#[test]
fn test_foreign_delete_is_forbidden_and_harmless() {
    let (_dir, store) = open_store();
    let chirp = store.create_chirp(1, "keep me").unwrap();
    let before = std::fs::read(store.path()).unwrap();

    assert!(matches!(
        store.delete_chirp(chirp.id, 2),
        Err(StoreError::Forbidden)
    ));
    assert_eq!(store.get_chirp(chirp.id).unwrap(), chirp);
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[test]
fn test_missing_chirp_delete_is_not_found() {
    let (_dir, store) = open_store();
    assert!(matches!(
        store.delete_chirp(1, 1),
        Err(StoreError::NotFound(Entity::Chirp))
    ));
}

// =============================================================================
// Token revocation
// =============================================================================

#[test]
fn test_revoke_twice() {
    let (_dir, store) = open_store();

    store.revoke_token("refresh-1").unwrap();
    assert!(store.is_token_revoked("refresh-1").unwrap());

    assert!(matches!(
        store.revoke_token("refresh-1"),
        Err(StoreError::AlreadyRevoked)
    ));
    assert!(store.is_token_revoked("refresh-1").unwrap());
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn test_login_after_credential_update() {
    let (_dir, store) = open_store();
    let user = store.create_user("first@example.com", "one").unwrap();

    store
        .update_user_credentials(user.id, "second@example.com", "two")
        .unwrap();

    assert_eq!(
        store.verify_password("SECOND@example.com", "two").unwrap().id,
        user.id
    );
    assert!(matches!(
        store.verify_password("second@example.com", "one"),
        Err(StoreError::AuthFailed)
    ));
    assert!(matches!(
        store.verify_password("first@example.com", "one"),
        Err(StoreError::NotFound(Entity::User))
    ));
}

#[test]
fn test_password_hash_not_in_profile() {
    let (_dir, store) = open_store();
    let user = store.create_user("p@example.com", "plaintext-pw").unwrap();

    let profile = serde_json::to_string(&user.profile()).unwrap();
    assert!(!profile.contains(&user.password_hash));
    assert!(!profile.contains("plaintext-pw"));

    // The snapshot file itself never holds the plaintext
    let on_disk = std::fs::read_to_string(store.path()).unwrap();
    assert!(!on_disk.contains("plaintext-pw"));
}
