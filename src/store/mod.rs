//! # Document Store
//!
//! Single source of truth for the current session's documents. The store
//! owns the in-memory collection, mediates every create / update / share /
//! load operation against the remote store of record, and reconciles
//! optimistic local edits with remote confirmation.
//!
//! ## Consistency Rules
//!
//! - **Create and update are optimistic**: local state changes first and a
//!   failed remote call is logged without rolling the local change back,
//!   so the local view can diverge from the backend until the next load.
//! - **Share toggling is not optimistic**: the public flag only flips
//!   locally after the remote store confirms it, because an incorrect
//!   optimistic toggle could expose a private document.
//! - Every mutation replaces whole records under the collection lock;
//!   a partially updated document is never observable.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clouddocs::auth::AuthSession;
//! use clouddocs::remote::memory::InMemoryDocumentStore;
//! use clouddocs::store::DocumentStore;
//!
//! # async fn example() {
//! let remote = Arc::new(InMemoryDocumentStore::new());
//! let session = AuthSession::new();
//! let store = Arc::new(DocumentStore::new(remote, session));
//!
//! // Reload the collection whenever the session identity changes
//! let listener = Arc::clone(&store).spawn_session_listener();
//!
//! let doc = store.create_document(Some("Notes"), Some("Hello")).await;
//! println!("created {}", doc.id);
//! # listener.abort();
//! # }
//! ```

pub mod autosave;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::auth::AuthSession;
use crate::remote::SharedRemoteStore;
use crate::shared::document::Document;
use crate::shared::{DocumentUpdate, StoreNotification};

/// Capacity of the notification broadcast channel
const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;

/// The document state container
pub struct DocumentStore {
    /// Remote store of record
    remote: SharedRemoteStore,
    /// Current session identity
    session: AuthSession,
    /// In-memory document collection, newest first
    documents: RwLock<Vec<Document>>,
    /// Transient notifications for the UI shell
    notifications: broadcast::Sender<StoreNotification>,
}

impl DocumentStore {
    /// Create a new store with an empty collection
    pub fn new(remote: SharedRemoteStore, session: AuthSession) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);
        Self {
            remote,
            session,
            documents: RwLock::new(Vec::new()),
            notifications,
        }
    }

    /// Create a store pre-seeded with local documents.
    ///
    /// Used by the demo mode, which shows a sample collection before any
    /// session exists.
    pub fn with_documents(
        remote: SharedRemoteStore,
        session: AuthSession,
        documents: Vec<Document>,
    ) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);
        Self {
            remote,
            session,
            documents: RwLock::new(documents),
            notifications,
        }
    }

    /// The session identity this store is bound to
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Subscribe to transient notifications
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<StoreNotification> {
        self.notifications.subscribe()
    }

    /// Snapshot of the current collection, newest first
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    /// Pure local lookup by document id
    pub async fn get_document(&self, id: &str) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
    }

    /// Replace the collection with the session owner's remote documents.
    ///
    /// Without a session the collection is cleared and no network call is
    /// made. On backend failure the previous collection is kept; stale
    /// data beats an empty screen.
    pub async fn load_documents(&self) {
        let Some(user) = self.session.current_user() else {
            self.documents.write().await.clear();
            debug!("no session; cleared document collection");
            return;
        };

        match self.remote.query_by_owner(&user.id).await {
            Ok(rows) => {
                let documents: Vec<Document> = rows.iter().map(Document::from).collect();
                debug!(count = documents.len(), "loaded documents from remote");
                *self.documents.write().await = documents;
            }
            Err(err) => {
                warn!(error = %err, "failed to load documents; keeping previous collection");
                self.notify(StoreNotification::load_failed(err.to_string()));
            }
        }
    }

    /// Create a new document, optimistically inserted at the front of the
    /// collection.
    ///
    /// With a session the document is also persisted remotely and its
    /// temporary id is replaced by the store-assigned one; the returned
    /// document carries the permanent address. If the remote create fails
    /// the document stays in the collection under its temporary id,
    /// indistinguishable from a confirmed one, until the next load.
    pub async fn create_document(&self, title: Option<&str>, content: Option<&str>) -> Document {
        let local = Document::new_local(title, content);
        self.documents.write().await.insert(0, local.clone());

        let Some(user) = self.session.current_user() else {
            debug!(id = %local.id, "created local-only document without session");
            return local;
        };

        match self.remote.insert(&user.id, &local.title, &local.content).await {
            Ok(stored) => {
                let mut documents = self.documents.write().await;
                match documents.iter_mut().find(|doc| doc.id == local.id) {
                    Some(slot) => {
                        let mut confirmed = slot.clone();
                        confirmed.id = stored.id.clone();
                        confirmed.share_id = Some(stored.share_id.clone());
                        confirmed.is_public = stored.is_public;
                        *slot = confirmed.clone();
                        debug!(temp_id = %local.id, id = %stored.id, "remote create confirmed");
                        confirmed
                    }
                    // The collection was replaced while the create was in
                    // flight; return the confirmed document without
                    // touching the collection.
                    None => Document::from(&stored),
                }
            }
            Err(err) => {
                warn!(error = %err, id = %local.id, "remote create failed; keeping temporary id");
                self.notify(StoreNotification::save_failed(err.to_string()));
                local
            }
        }
    }

    /// Merge a partial update into the matching document.
    ///
    /// The local merge is applied unconditionally; with a session the
    /// update is also sent to the remote store, whose failure is logged
    /// but never reverts the local change. Returns the updated document,
    /// or `None` for an unknown id.
    pub async fn update_document(&self, id: &str, update: DocumentUpdate) -> Option<Document> {
        let updated = {
            let mut documents = self.documents.write().await;
            let slot = documents.iter_mut().find(|doc| doc.id == id)?;
            let mut next = slot.clone();
            next.apply_update(&update);
            *slot = next.clone();
            next
        };

        if let Some(user) = self.session.current_user() {
            if let Err(err) = self.remote.update(id, &user.id, &update).await {
                warn!(error = %err, id, "remote update failed; local state left optimistic");
                self.notify(StoreNotification::save_failed(err.to_string()));
            }
        }

        Some(updated)
    }

    /// Flip the public flag on a document and return its share id.
    ///
    /// Requires an authenticated session. The local flag only changes
    /// after the remote store confirms the new value; on any failure the
    /// local state is untouched and `None` is returned.
    pub async fn toggle_document_public(&self, id: &str) -> Option<String> {
        let user = self.session.current_user()?;
        let target = self.get_document(id).await?;
        let next_public = !target.is_public;

        match self.remote.set_public(id, &user.id, next_public).await {
            Ok(share_id) => {
                {
                    let mut documents = self.documents.write().await;
                    if let Some(slot) = documents.iter_mut().find(|doc| doc.id == id) {
                        let mut next = slot.clone();
                        next.is_public = next_public;
                        next.share_id = Some(share_id.clone());
                        *slot = next;
                    }
                }
                debug!(id, is_public = next_public, "visibility confirmed by remote");
                if next_public {
                    self.notify(StoreNotification::link_generated());
                }
                Some(share_id)
            }
            Err(err) => {
                warn!(error = %err, id, "visibility change failed; local state unchanged");
                None
            }
        }
    }

    /// Fetch a public document by share id, without authentication.
    ///
    /// Returns `None` when no document matches, the match is private, or
    /// the backend call fails.
    pub async fn get_document_by_share_id(&self, share_id: &str) -> Option<Document> {
        match self.remote.query_by_share_id(share_id).await {
            Ok(Some(stored)) => Some(Document::from(&stored)),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, share_id, "share lookup failed");
                None
            }
        }
    }

    /// Spawn the task that reloads the collection on every session change.
    ///
    /// Performs an initial load immediately (covering session restore),
    /// then reloads after each login or logout. The task ends when the
    /// session handle is dropped.
    pub fn spawn_session_listener(self: std::sync::Arc<Self>) -> tokio::task::JoinHandle<()> {
        let mut changes = self.session.subscribe();
        tokio::spawn(async move {
            loop {
                self.load_documents().await;
                if changes.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    pub(crate) fn notify(&self, notification: StoreNotification) {
        // Nobody listening is fine; notifications are fire-and-forget.
        let _ = self.notifications.send(notification);
    }
}
