//! Transient Notification System
//!
//! This module defines the notification values emitted by the document
//! store so a UI shell can render them as transient toasts. Notifications
//! are broadcast using `tokio::sync::broadcast`; every subscriber receives
//! a copy of each event and slow subscribers simply lag.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Kind of transient notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A document save completed
    DocumentSaved,
    /// A remote save failed; local state is still optimistic
    SaveFailed,
    /// A collaboration link was generated for a document
    LinkGenerated,
    /// Loading the document collection from the remote store failed
    LoadFailed,
}

/// A transient notification for the UI shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreNotification {
    /// Kind of notification
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Longer human-readable detail line
    pub detail: String,
    /// RFC 3339 timestamp of when the notification was created
    pub timestamp: String,
}

impl StoreNotification {
    /// Create a new notification
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: detail.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Notification for a completed save
    pub fn saved() -> Self {
        Self::new(
            NotificationKind::DocumentSaved,
            "Document saved",
            "All changes have been saved to the cloud.",
        )
    }

    /// Notification for a failed remote save
    pub fn save_failed(detail: impl Into<String>) -> Self {
        Self::new(NotificationKind::SaveFailed, "Save failed", detail)
    }

    /// Notification for a newly generated collaboration link
    pub fn link_generated() -> Self {
        Self::new(
            NotificationKind::LinkGenerated,
            "Collaboration link generated",
            "Share this link with others to collaborate on this document.",
        )
    }

    /// Notification for a failed collection load
    pub fn load_failed(detail: impl Into<String>) -> Self {
        Self::new(NotificationKind::LoadFailed, "Could not load documents", detail)
    }
}

/// Broadcast channel carrying store notifications
///
/// This type can be cloned and shared so notifications can be emitted from
/// anywhere in the state layer.
pub type NotificationBroadcast = broadcast::Sender<StoreNotification>;
