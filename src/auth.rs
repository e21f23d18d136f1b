//! Authentication Session
//!
//! Holds the nullable current-user identity and notifies subscribers when
//! it changes. The document store subscribes to this handle so the document
//! collection is reloaded on every login, logout, or session restore.
//!
//! Token issuance and credential checking live in the auth provider behind
//! the UI shell; this module only tracks who is signed in right now.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// The signed-in user identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// Opaque user id; documents are owner-scoped to this value
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Optional avatar URL
    pub avatar: Option<String>,
}

impl AuthUser {
    /// Create a new user identity without an avatar
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }
}

/// Cloneable handle on the current session identity
///
/// All clones share the same underlying state; setting or clearing the
/// user through any clone is observed by every subscriber.
#[derive(Debug, Clone)]
pub struct AuthSession {
    sender: Arc<watch::Sender<Option<AuthUser>>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl AuthSession {
    /// Create a new unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already signed in
    pub fn signed_in(user: AuthUser) -> Self {
        let (sender, _) = watch::channel(Some(user));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Get the current user, if any
    pub fn current_user(&self) -> Option<AuthUser> {
        self.sender.borrow().clone()
    }

    /// Get the current user id, if any
    pub fn user_id(&self) -> Option<String> {
        self.sender.borrow().as_ref().map(|user| user.id.clone())
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Record a sign-in or session restore
    pub fn set_user(&self, user: AuthUser) {
        self.sender.send_replace(Some(user));
    }

    /// Record a sign-out
    pub fn clear(&self) {
        self.sender.send_replace(None);
    }

    /// Subscribe to session identity changes
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.sender.subscribe()
    }
}
