//! Remote Document Store
//!
//! Backend-agnostic interface to the persistent store of record. The
//! document store only ever talks to the remote through
//! [`RemoteDocumentStore`], so any document-oriented backend can sit on
//! the other side: the crate ships an HTTP implementation
//! ([`http::HttpDocumentStore`]) and an in-process one
//! ([`memory::InMemoryDocumentStore`]) used by tests and the local demo
//! mode.
//!
//! Every mutating or listing operation is owner-scoped: only the owning
//! identity may update, relist, or re-share a document. Share-id reads
//! bypass ownership but succeed only while the document is public.

pub mod http;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::document::{derive_excerpt, format_last_edited, Document};
use crate::shared::{DocumentUpdate, StoreResult};

/// A document row as persisted by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredDocument {
    /// Store-assigned document id
    pub id: String,
    /// Owning user id
    pub owner_id: String,
    /// Document title
    pub title: String,
    /// Document body
    pub content: String,
    /// Store-assigned share id, permanent for the document's lifetime
    pub share_id: String,
    /// Whether share-id reads are allowed
    pub is_public: bool,
    /// Server-side last-modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&StoredDocument> for Document {
    fn from(stored: &StoredDocument) -> Self {
        Self {
            id: stored.id.clone(),
            title: stored.title.clone(),
            content: stored.content.clone(),
            excerpt: derive_excerpt(&stored.content),
            last_edited: format_last_edited(stored.updated_at),
            collaborators: 0,
            share_id: Some(stored.share_id.clone()),
            is_public: stored.is_public,
        }
    }
}

/// Backend-agnostic contract for the persistent document store.
///
/// Implementations must scope `update`, `query_by_owner`, and `set_public`
/// to the given owner and refresh `updated_at` server-side on every write.
#[async_trait]
pub trait RemoteDocumentStore: Send + Sync {
    /// Persist a new document for the given owner.
    ///
    /// The store assigns the document id and share id; new documents start
    /// out private.
    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
    ) -> StoreResult<StoredDocument>;

    /// Apply a partial update to an owned document.
    async fn update(&self, id: &str, owner_id: &str, changes: &DocumentUpdate) -> StoreResult<()>;

    /// List all documents owned by the given user, most recently updated
    /// first.
    async fn query_by_owner(&self, owner_id: &str) -> StoreResult<Vec<StoredDocument>>;

    /// Look up a document by share id, without authentication.
    ///
    /// Returns `Ok(None)` when no document matches or the match is private.
    async fn query_by_share_id(&self, share_id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Set the public flag on an owned document, returning its share id.
    async fn set_public(&self, id: &str, owner_id: &str, is_public: bool) -> StoreResult<String>;
}

/// Shared handle to a remote store implementation.
pub type SharedRemoteStore = Arc<dyn RemoteDocumentStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stored() -> StoredDocument {
        StoredDocument {
            id: "42".to_string(),
            owner_id: "u1".to_string(),
            title: "Notes".to_string(),
            content: "Hello".to_string(),
            share_id: "abc".to_string(),
            is_public: true,
            updated_at: Utc.with_ymd_and_hms(2026, 1, 5, 14, 45, 0).unwrap(),
        }
    }

    #[test]
    fn test_document_from_stored_derives_display_fields() {
        let doc = Document::from(&stored());
        assert_eq!(doc.id, "42");
        assert_eq!(doc.excerpt, "Hello");
        assert_eq!(doc.last_edited, "Jan 5, 2026 at 2:45 PM");
        assert_eq!(doc.collaborators, 0);
        assert_eq!(doc.share_id.as_deref(), Some("abc"));
        assert!(doc.is_public);
    }
}
