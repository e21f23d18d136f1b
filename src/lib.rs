//! CloudDocs - Document State Synchronization Layer
//!
//! This library is the state layer of the CloudDocs editor: it owns the
//! in-memory document collection for the current session and mediates
//! every create, update, share, and load operation against a remote
//! store of record.
//!
//! # Overview
//!
//! - **Optimistic mutation**: creates and updates apply to local state
//!   immediately and reconcile with the remote store as confirmations
//!   arrive; a failed remote call never takes the local change away.
//! - **Share links**: each document carries a permanent share id; the
//!   public flag gates anonymous reads and only ever flips after remote
//!   confirmation.
//! - **Session-driven loading**: the collection is replaced whenever the
//!   authenticated session changes (login, logout, session restore).
//! - **Auto-save**: an editing surface owns a cancellable fixed-period
//!   scheduler that saves its draft exactly as a manual save would, with
//!   at most one save in flight.
//!
//! # Module Structure
//!
//! - **`shared`** - document model, configuration, errors, notifications
//! - **`auth`** - the nullable session identity and its change stream
//! - **`remote`** - the backend contract plus HTTP and in-memory
//!   implementations
//! - **`store`** - the document store core and the editor session with
//!   its auto-save scheduler
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clouddocs::auth::{AuthSession, AuthUser};
//! use clouddocs::remote::http::HttpDocumentStore;
//! use clouddocs::shared::AppConfig;
//! use clouddocs::store::DocumentStore;
//!
//! # async fn example() {
//! let config = AppConfig::from_env();
//! let remote = Arc::new(HttpDocumentStore::new(&config));
//! let session = AuthSession::new();
//! let store = Arc::new(DocumentStore::new(remote, session.clone()));
//! let listener = Arc::clone(&store).spawn_session_listener();
//!
//! session.set_user(AuthUser::new("u1", "Demo User", "demo@example.com"));
//! // the listener reloads the collection for the signed-in user
//! # listener.abort();
//! # }
//! ```
//!
//! # Concurrency
//!
//! All state lives behind `tokio::sync` primitives and every mutation is
//! an atomic whole-record replace; callers only ever observe a document
//! before or after an operation, never mid-update. Operations suspend at
//! network boundaries and nothing blocks the runtime.

/// Shared types and data structures
pub mod shared;

/// Authentication session identity
pub mod auth;

/// Remote document store contract and implementations
pub mod remote;

/// Document store core and editor sessions
pub mod store;

pub use auth::{AuthSession, AuthUser};
pub use shared::{AppConfig, Document, DocumentUpdate, StoreError, StoreNotification};
pub use store::autosave::{AutoSaveScheduler, EditorSession};
pub use store::DocumentStore;
