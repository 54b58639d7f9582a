//! Chirp operations

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Store;
use crate::errors::{Entity, StoreError, StoreResult};
use crate::observability::Logger;
use crate::snapshot::{Chirp, ChirpId, UserId};

/// Ordering of `list_chirps` results by chirp id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: '{}'. Must be 'asc' or 'desc'.", other)),
        }
    }
}

impl Store {
    /// Stores a new chirp under the next chirp id.
    ///
    /// `author_id` is not checked against the users table.
    pub fn create_chirp(&self, author_id: UserId, body: impl Into<String>) -> StoreResult<Chirp> {
        let body = body.into();

        let chirp = self.mutate(|snapshot| {
            let chirp = Chirp {
                id: snapshot.allocate_chirp_id()?,
                author_id,
                body,
            };
            snapshot.chirps.insert(chirp.id, chirp.clone());
            Ok(chirp)
        })?;

        Logger::info(
            "CHIRP_CREATED",
            &[
                ("author_id", author_id.to_string().as_str()),
                ("chirp_id", chirp.id.to_string().as_str()),
            ],
        );

        Ok(chirp)
    }

    /// Looks up one chirp
    pub fn get_chirp(&self, id: ChirpId) -> StoreResult<Chirp> {
        self.read(|mut snapshot| {
            snapshot
                .chirps
                .remove(&id)
                .ok_or(StoreError::NotFound(Entity::Chirp))
        })
    }

    /// Lists chirps ordered by id, optionally only those by one author
    pub fn list_chirps(
        &self,
        author_id: Option<UserId>,
        order: SortOrder,
    ) -> StoreResult<Vec<Chirp>> {
        self.read(|snapshot| {
            // BTreeMap iteration is already ascending by id
            let mut chirps: Vec<Chirp> = snapshot
                .chirps
                .into_values()
                .filter(|c| author_id.map_or(true, |a| c.author_id == a))
                .collect();

            if order == SortOrder::Desc {
                chirps.reverse();
            }

            Ok(chirps)
        })
    }

    /// Deletes a chirp on behalf of `requesting_user_id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no chirp has this id
    /// - `Forbidden` if the chirp belongs to someone else; nothing is written
    pub fn delete_chirp(&self, id: ChirpId, requesting_user_id: UserId) -> StoreResult<()> {
        let result = self.mutate(|snapshot| {
            let chirp = snapshot
                .chirps
                .get(&id)
                .ok_or(StoreError::NotFound(Entity::Chirp))?;

            if chirp.author_id != requesting_user_id {
                return Err(StoreError::Forbidden);
            }

            snapshot.chirps.remove(&id);
            Ok(())
        });

        match &result {
            Ok(()) => Logger::info("CHIRP_DELETED", &[("chirp_id", id.to_string().as_str())]),
            Err(StoreError::Forbidden) => Logger::warn(
                "CHIRP_DELETE_FORBIDDEN",
                &[
                    ("chirp_id", id.to_string().as_str()),
                    ("requesting_user_id", requesting_user_id.to_string().as_str()),
                ],
            ),
            Err(_) => {}
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::temp_store;

    #[test]
    fn test_create_chirp_on_fresh_store() {
        let (_dir, store) = temp_store();
        let chirp = store.create_chirp(7, "hello").unwrap();

        assert_eq!(
            chirp,
            Chirp {
                id: 1,
                author_id: 7,
                body: "hello".to_string(),
            }
        );
        assert_eq!(store.get_chirp(1).unwrap(), chirp);
    }

    #[test]
    fn test_get_missing_chirp() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.get_chirp(42),
            Err(StoreError::NotFound(Entity::Chirp))
        ));
    }

    #[test]
    fn test_list_filters_by_author() {
        let (_dir, store) = temp_store();
        store.create_chirp(7, "hello").unwrap();

        let mine = store.list_chirps(Some(7), SortOrder::Asc).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].body, "hello");

        assert!(store.list_chirps(Some(99), SortOrder::Asc).unwrap().is_empty());
    }

    #[test]
    fn test_list_sort_orders() {
        let (_dir, store) = temp_store();
        for body in ["a", "b", "c"] {
            store.create_chirp(1, body).unwrap();
        }
        store.create_chirp(2, "other").unwrap();

        let asc: Vec<_> = store
            .list_chirps(None, SortOrder::default())
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(asc, vec![1, 2, 3, 4]);

        let desc: Vec<_> = store
            .list_chirps(Some(1), SortOrder::Desc)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(desc, vec![3, 2, 1]);
    }

    #[test]
    fn test_delete_by_author() {
        let (_dir, store) = temp_store();
        let chirp = store.create_chirp(3, "bye").unwrap();

        store.delete_chirp(chirp.id, 3).unwrap();
        assert!(matches!(
            store.get_chirp(chirp.id),
            Err(StoreError::NotFound(Entity::Chirp))
        ));
        assert!(matches!(
            store.delete_chirp(chirp.id, 3),
            Err(StoreError::NotFound(Entity::Chirp))
        ));
    }

    #[test]
    fn test_delete_by_other_user_is_forbidden() {
        let (_dir, store) = temp_store();
        let chirp = store.create_chirp(3, "mine").unwrap();

        assert!(matches!(
            store.delete_chirp(chirp.id, 4),
            Err(StoreError::Forbidden)
        ));
        assert_eq!(store.get_chirp(chirp.id).unwrap(), chirp);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
