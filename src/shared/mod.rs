//! Shared Module
//!
//! This module contains the types and data structures shared by every part
//! of the document state layer: the document model itself, configuration,
//! the error taxonomy, and the transient notification values consumed by
//! a UI shell.

/// Document model and derivation rules
pub mod document;

/// Transient notification system
pub mod notification;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use document::{Document, DocumentUpdate};
pub use error::{StoreError, StoreResult};
pub use notification::{NotificationBroadcast, NotificationKind, StoreNotification};
