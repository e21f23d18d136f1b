//! # Editor Session & Auto-Save
//!
//! An [`EditorSession`] is the editing surface's handle on one document:
//! it owns the draft title and content, performs manual saves, and adopts
//! the document's permanent id after the first save creates it. The
//! [`AutoSaveScheduler`] drives the session on a fixed period while the
//! surface is open.
//!
//! ## Guarantees
//!
//! - At most one save is in flight per session; a firing that arrives
//!   while a save is running is suppressed, not queued.
//! - Auto-save never runs for read-only shared views.
//! - A draft that is still empty and untitled is not saved.
//! - Cancelling the scheduler stops future firings immediately; a save
//!   already in flight completes on its own and no-ops safely even if the
//!   surface is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::DocumentStore;
use crate::shared::document::UNTITLED_TITLE;
use crate::shared::{AppConfig, DocumentUpdate, StoreNotification};

/// Default auto-save period
const DEFAULT_PERIOD: Duration = Duration::from_secs(30);

/// One editing surface's session on a document
pub struct EditorSession {
    /// The store all saves go through
    store: Arc<DocumentStore>,
    /// Permanent document id; `None` until the first save creates one
    document_id: RwLock<Option<String>>,
    /// Draft title
    title: RwLock<String>,
    /// Draft content
    content: RwLock<String>,
    /// Shared read-only view; saves are rejected
    read_only: bool,
    /// Explicit guard: a save is currently in flight
    save_in_flight: AtomicBool,
}

impl EditorSession {
    fn from_parts(
        store: Arc<DocumentStore>,
        document_id: Option<String>,
        title: String,
        content: String,
        read_only: bool,
    ) -> Self {
        Self {
            store,
            document_id: RwLock::new(document_id),
            title: RwLock::new(title),
            content: RwLock::new(content),
            read_only,
            save_in_flight: AtomicBool::new(false),
        }
    }

    /// Start a session for a brand-new document.
    ///
    /// The document is not created in the store until the first save.
    pub fn new_document(store: Arc<DocumentStore>) -> Self {
        Self::from_parts(store, None, UNTITLED_TITLE.to_string(), String::new(), false)
    }

    /// Open an existing document for editing.
    ///
    /// Returns `None` when the id has no match in the local collection.
    pub async fn open(store: Arc<DocumentStore>, id: &str) -> Option<Self> {
        let doc = store.get_document(id).await?;
        Some(Self::from_parts(
            store,
            Some(doc.id),
            doc.title,
            doc.content,
            false,
        ))
    }

    /// Open a public document through its share id, as a read-only view.
    pub async fn open_shared(store: Arc<DocumentStore>, share_id: &str) -> Option<Self> {
        let doc = store.get_document_by_share_id(share_id).await?;
        Some(Self::from_parts(
            store,
            Some(doc.id),
            doc.title,
            doc.content,
            true,
        ))
    }

    /// Whether this session is a read-only shared view
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The document's id, once known
    pub async fn document_id(&self) -> Option<String> {
        self.document_id.read().await.clone()
    }

    /// Current draft title
    pub async fn title(&self) -> String {
        self.title.read().await.clone()
    }

    /// Current draft content
    pub async fn content(&self) -> String {
        self.content.read().await.clone()
    }

    /// Replace the draft title
    pub async fn set_title(&self, title: impl Into<String>) {
        *self.title.write().await = title.into();
    }

    /// Replace the draft content
    pub async fn set_content(&self, content: impl Into<String>) {
        *self.content.write().await = content.into();
    }

    /// Whether the draft has anything worth saving yet
    pub async fn has_unsaved_substance(&self) -> bool {
        let content = self.content.read().await;
        if !content.trim().is_empty() {
            return true;
        }
        *self.title.read().await != UNTITLED_TITLE
    }

    /// Save the draft, creating the document on first save.
    ///
    /// Returns `false` when the session is read-only, a save is already in
    /// flight, or the document no longer exists in the collection.
    pub async fn save(&self) -> bool {
        if self.read_only {
            return false;
        }
        if self.save_in_flight.swap(true, Ordering::SeqCst) {
            debug!("save already in flight; skipping");
            return false;
        }
        let saved = self.save_draft().await;
        self.save_in_flight.store(false, Ordering::SeqCst);
        saved
    }

    async fn save_draft(&self) -> bool {
        let title = self.title.read().await.clone();
        let content = self.content.read().await.clone();
        let existing = self.document_id.read().await.clone();

        match existing {
            Some(id) => {
                let update = DocumentUpdate::new(title, content);
                if self.store.update_document(&id, update).await.is_none() {
                    // Collection changed underneath the surface (e.g. the
                    // session signed out); nothing to save against.
                    debug!(id = %id, "document gone from collection; save skipped");
                    return false;
                }
            }
            None => {
                let doc = self
                    .store
                    .create_document(Some(&title), Some(&content))
                    .await;
                *self.document_id.write().await = Some(doc.id);
            }
        }

        self.store.notify(StoreNotification::saved());
        true
    }
}

/// Cancellable fixed-period auto-save task
///
/// Owned by the editing surface: started when the surface opens in edit
/// mode and cancelled when it closes. Dropping the scheduler also cancels
/// the task.
pub struct AutoSaveScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Default for AutoSaveScheduler {
    fn default() -> Self {
        Self::with_period(DEFAULT_PERIOD)
    }
}

impl AutoSaveScheduler {
    /// Create a scheduler with the default 30-second period
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with a custom period
    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Create a scheduler with the period from the application config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_period(Duration::from_secs(config.auto_save_interval_secs))
    }

    /// Start auto-saving the given session.
    ///
    /// Read-only sessions are never scheduled. Starting replaces any
    /// previously running schedule.
    pub fn start(&mut self, session: &Arc<EditorSession>) {
        self.cancel();
        if session.is_read_only() {
            debug!("read-only session; auto-save not scheduled");
            return;
        }

        let session = Arc::clone(session);
        let period = self.period;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; the first save should wait a
            // full period
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !session.has_unsaved_substance().await {
                    continue;
                }
                session.save().await;
            }
        }));
    }

    /// Reset the schedule, e.g. after the surface's inputs changed
    pub fn restart(&mut self, session: &Arc<EditorSession>) {
        self.start(session);
    }

    /// Stop future firings. A save already in flight completes on its own.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether the schedule is currently running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for AutoSaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthSession, AuthUser};
    use crate::remote::memory::InMemoryDocumentStore;

    fn store_with_session() -> Arc<DocumentStore> {
        let remote = Arc::new(InMemoryDocumentStore::new());
        let session = AuthSession::signed_in(AuthUser::new("u1", "Demo User", "demo@example.com"));
        Arc::new(DocumentStore::new(remote, session))
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_substance() {
        let session = EditorSession::new_document(store_with_session());
        assert!(!session.has_unsaved_substance().await);

        session.set_content("  \n ").await;
        assert!(!session.has_unsaved_substance().await);

        session.set_title("Renamed").await;
        assert!(session.has_unsaved_substance().await);
    }

    #[tokio::test]
    async fn test_first_save_adopts_document_id() {
        let store = store_with_session();
        let session = EditorSession::new_document(Arc::clone(&store));
        session.set_title("Notes").await;
        session.set_content("Hello").await;

        assert!(session.document_id().await.is_none());
        assert!(session.save().await);

        let id = session.document_id().await.expect("id adopted after save");
        let doc = store.get_document(&id).await.expect("document in collection");
        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.content, "Hello");
    }

    #[tokio::test]
    async fn test_second_save_updates_in_place() {
        let store = store_with_session();
        let session = EditorSession::new_document(Arc::clone(&store));
        session.set_content("v1").await;
        assert!(session.save().await);
        let id = session.document_id().await.unwrap();

        session.set_content("v2").await;
        assert!(session.save().await);
        assert_eq!(session.document_id().await.unwrap(), id);

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "v2");
    }

    #[tokio::test]
    async fn test_read_only_session_rejects_save() {
        let store = store_with_session();
        let doc = store.create_document(Some("Notes"), Some("Hello")).await;
        store.toggle_document_public(&doc.id).await.unwrap();
        let share_id = store.get_document(&doc.id).await.unwrap().share_id.unwrap();

        let shared = EditorSession::open_shared(Arc::clone(&store), &share_id)
            .await
            .expect("public document opens");
        assert!(shared.is_read_only());
        assert!(!shared.save().await);
    }

    #[tokio::test]
    async fn test_open_unknown_id_returns_none() {
        let store = store_with_session();
        assert!(EditorSession::open(store, "missing").await.is_none());
    }
}
