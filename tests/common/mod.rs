//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests: a demo identity, stores
//! wired to the in-memory remote, and a polling helper for asserting on
//! background-task effects.
#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use clouddocs::auth::{AuthSession, AuthUser};
use clouddocs::remote::memory::InMemoryDocumentStore;
use clouddocs::store::DocumentStore;

/// The identity used by authenticated tests
pub fn demo_user() -> AuthUser {
    AuthUser::new("u1", "Demo User", "demo@example.com")
}

/// Fresh in-memory remote store
pub fn memory_remote() -> Arc<InMemoryDocumentStore> {
    Arc::new(InMemoryDocumentStore::new())
}

/// Document store with a signed-in session
pub fn signed_in_store(remote: Arc<InMemoryDocumentStore>) -> Arc<DocumentStore> {
    let session = AuthSession::signed_in(demo_user());
    Arc::new(DocumentStore::new(remote, session))
}

/// Document store with no session
pub fn anonymous_store(remote: Arc<InMemoryDocumentStore>) -> Arc<DocumentStore> {
    Arc::new(DocumentStore::new(remote, AuthSession::new()))
}

/// Poll until `check` passes, panicking after a short deadline.
///
/// Used for effects applied by background tasks (session listener).
pub async fn wait_until<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {}", what);
}
