//! Shared Error Types
//!
//! This module defines the error taxonomy for the document state layer.
//! Errors fall into three groups with different propagation rules:
//!
//! - **Not-found** - a requested document does not exist (or is private);
//!   surfaced as an explicit empty result by the store, never thrown.
//! - **Unauthenticated** - an operation requiring a session was attempted
//!   without one; a soft degradation, not a hard failure.
//! - **Backend failures** - network or store errors from the remote; caught
//!   and logged for optimistic operations, surfaced as empty results for
//!   security-sensitive ones.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across task
//! boundaries.
use thiserror::Error;

/// Result type alias for remote store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by remote document store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Network-level failure reaching the remote store.
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// The remote store answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status code returned by the backend
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// No document matched the requested id for the calling owner.
    #[error("Document not found: {id}")]
    NotFound {
        /// The id that had no match
        id: String,
    },

    /// The operation requires an authenticated session.
    #[error("Operation requires an authenticated session")]
    Unauthenticated,
}

impl StoreError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new backend error
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// True for errors that represent a missing (or private) document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
