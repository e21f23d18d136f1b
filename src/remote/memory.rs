//! In-Memory Document Store
//!
//! In-process implementation of [`RemoteDocumentStore`] backing the local
//! demo mode and the integration tests. Behaves like the real backend:
//! assigns ids and share ids, scopes every mutation to the owning user,
//! refreshes `updated_at` on writes, and enforces the public gate on
//! share-id reads.
//!
//! Tests can inject a one-shot failure with [`InMemoryDocumentStore::fail_next_request`]
//! to exercise the error paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RemoteDocumentStore, StoredDocument};
use crate::shared::{DocumentUpdate, StoreError, StoreResult};

/// In-memory remote store
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    /// Persisted rows
    rows: RwLock<Vec<StoredDocument>>,
    /// When set, the next request fails with an injected backend error
    fail_next: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next request fail with a backend error
    pub fn fail_next_request(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of rows currently persisted
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_injected_failure(&self) -> StoreResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::backend(500, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteDocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
    ) -> StoreResult<StoredDocument> {
        self.check_injected_failure()?;
        let stored = StoredDocument {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            share_id: Uuid::new_v4().simple().to_string(),
            is_public: false,
            updated_at: Utc::now(),
        };
        self.rows.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, owner_id: &str, changes: &DocumentUpdate) -> StoreResult<()> {
        self.check_injected_failure()?;
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id && row.owner_id == owner_id)
            .ok_or_else(|| StoreError::not_found(id))?;
        if let Some(title) = &changes.title {
            row.title = title.clone();
        }
        if let Some(content) = &changes.content {
            row.content = content.clone();
        }
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn query_by_owner(&self, owner_id: &str) -> StoreResult<Vec<StoredDocument>> {
        self.check_injected_failure()?;
        let rows = self.rows.read().await;
        let mut owned: Vec<StoredDocument> = rows
            .iter()
            .filter(|row| row.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    async fn query_by_share_id(&self, share_id: &str) -> StoreResult<Option<StoredDocument>> {
        self.check_injected_failure()?;
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.share_id == share_id && row.is_public)
            .cloned())
    }

    async fn set_public(&self, id: &str, owner_id: &str, is_public: bool) -> StoreResult<String> {
        self.check_injected_failure()?;
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id && row.owner_id == owner_id)
            .ok_or_else(|| StoreError::not_found(id))?;
        row.is_public = is_public;
        Ok(row.share_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_ids_and_starts_private() {
        let store = InMemoryDocumentStore::new();
        let stored = store.insert("u1", "Notes", "Hello").await.unwrap();
        assert!(!stored.id.is_empty());
        assert!(!stored.share_id.is_empty());
        assert_ne!(stored.id, stored.share_id);
        assert!(!stored.is_public);
    }

    #[tokio::test]
    async fn test_update_is_owner_scoped() {
        let store = InMemoryDocumentStore::new();
        let stored = store.insert("u1", "Notes", "Hello").await.unwrap();

        let err = store
            .update(&stored.id, "intruder", &DocumentUpdate::title("Stolen"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        store
            .update(&stored.id, "u1", &DocumentUpdate::title("Renamed"))
            .await
            .unwrap();
        let rows = store.query_by_owner("u1").await.unwrap();
        assert_eq!(rows[0].title, "Renamed");
    }

    #[tokio::test]
    async fn test_query_by_owner_orders_most_recent_first() {
        let store = InMemoryDocumentStore::new();
        let first = store.insert("u1", "First", "").await.unwrap();
        let second = store.insert("u1", "Second", "").await.unwrap();
        store.insert("u2", "Other", "").await.unwrap();

        store
            .update(&first.id, "u1", &DocumentUpdate::content("touched"))
            .await
            .unwrap();

        let rows = store.query_by_owner("u1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, first.id);
        assert_eq!(rows[1].id, second.id);
    }

    #[tokio::test]
    async fn test_share_query_requires_public_flag() {
        let store = InMemoryDocumentStore::new();
        let stored = store.insert("u1", "Notes", "Hello").await.unwrap();

        assert!(store
            .query_by_share_id(&stored.share_id)
            .await
            .unwrap()
            .is_none());

        store.set_public(&stored.id, "u1", true).await.unwrap();
        let found = store.query_by_share_id(&stored.share_id).await.unwrap();
        assert_eq!(found.unwrap().id, stored.id);
    }

    #[tokio::test]
    async fn test_set_public_returns_original_share_id() {
        let store = InMemoryDocumentStore::new();
        let stored = store.insert("u1", "Notes", "Hello").await.unwrap();
        let share_id = store.set_public(&stored.id, "u1", true).await.unwrap();
        assert_eq!(share_id, stored.share_id);
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot() {
        let store = InMemoryDocumentStore::new();
        store.fail_next_request();
        assert!(store.query_by_owner("u1").await.is_err());
        assert!(store.query_by_owner("u1").await.is_ok());
    }
}
