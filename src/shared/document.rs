//! # Document Model
//!
//! Core document types for the CloudDocs state layer. A [`Document`] is the
//! UI-facing record held in the in-memory collection; all display fields
//! (`excerpt`, `last_edited`) are derived here so that every code path that
//! mutates a document produces the same presentation.
//!
//! ## Derivation Rules
//!
//! - **Excerpt**: always the first 100 characters of `content`, with a
//!   `...` marker appended when the content is longer than that. The
//!   excerpt is never stored independently of the content.
//! - **Last edited**: the `"Just now"` sentinel on any local mutation,
//!   replaced by an absolute formatted time when a document is reloaded
//!   from the remote store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters included in a document excerpt.
pub const EXCERPT_LENGTH: usize = 100;

/// Marker appended to an excerpt when the content was truncated.
pub const EXCERPT_MARKER: &str = "...";

/// Default title for documents created without one.
pub const UNTITLED_TITLE: &str = "Untitled Document";

/// Label shown for a document that was mutated locally this session.
pub const JUST_NOW: &str = "Just now";

/// A document as held in the session's in-memory collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Opaque unique identifier. Temporary (locally generated) until the
    /// remote create call resolves, then replaced by the store-assigned id.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Document body, treated as opaque text.
    pub content: String,
    /// Derived preview of `content`; never mutated independently.
    pub excerpt: String,
    /// Human-readable last-edited label, not a machine timestamp.
    pub last_edited: String,
    /// Informational collaborator count; 0 for store-backed documents.
    pub collaborators: u32,
    /// Secondary identifier for anonymous reads; assigned by the remote
    /// store at creation and permanent once set.
    pub share_id: Option<String>,
    /// Whether the document is reachable through its share id.
    pub is_public: bool,
}

/// Partial update applied to a document.
///
/// Omitted fields are left untouched. A present `content` always forces
/// the excerpt to be recomputed, even when the new content is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentUpdate {
    /// New title, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New content, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DocumentUpdate {
    /// Update that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    /// Update that only changes the content.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Update that changes both title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// True when the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Document {
    /// Build a new local-only document with a temporary id.
    ///
    /// `title` defaults to [`UNTITLED_TITLE`] and `content` to the empty
    /// string. The document carries no share id until the remote store
    /// confirms the creation.
    pub fn new_local(title: Option<&str>, content: Option<&str>) -> Self {
        let title = title.unwrap_or(UNTITLED_TITLE).to_string();
        let content = content.unwrap_or_default().to_string();
        let excerpt = derive_excerpt(&content);
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            excerpt,
            last_edited: JUST_NOW.to_string(),
            collaborators: 0,
            share_id: None,
            is_public: false,
        }
    }

    /// Merge a partial update into this document, field by field.
    ///
    /// Recomputes the excerpt whenever `content` is present and stamps the
    /// last-edited label with the [`JUST_NOW`] sentinel.
    pub fn apply_update(&mut self, update: &DocumentUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
            self.excerpt = derive_excerpt(content);
        }
        self.last_edited = JUST_NOW.to_string();
    }
}

/// Derive the excerpt for the given content.
///
/// The excerpt is the first [`EXCERPT_LENGTH`] characters, with
/// [`EXCERPT_MARKER`] appended iff the content is longer than that.
pub fn derive_excerpt(content: &str) -> String {
    let length = content.chars().count();
    if length > EXCERPT_LENGTH {
        let mut excerpt: String = content.chars().take(EXCERPT_LENGTH).collect();
        excerpt.push_str(EXCERPT_MARKER);
        excerpt
    } else {
        content.to_string()
    }
}

/// Format a remote timestamp into the last-edited display label.
pub fn format_last_edited(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y at %-I:%M %p").to_string()
}

/// Seed collection shown in the local demo mode, before any session exists.
pub fn sample_documents() -> Vec<Document> {
    let seeds: [(&str, &str, &str, u32); 6] = [
        (
            "Project Roadmap",
            "This document outlines our Q3 project roadmap with key milestones and deliverables.",
            "Today at 2:45 PM",
            3,
        ),
        (
            "Meeting Notes",
            "Notes from the weekly product team meeting with action items.",
            "Yesterday",
            2,
        ),
        (
            "Design Guidelines",
            "Our brand style guide with color palette, typography, and component specifications.",
            "2 days ago",
            1,
        ),
        (
            "User Research",
            "Summary of user interviews and key findings from the recent user testing.",
            "Last week",
            0,
        ),
        (
            "Quarterly Report",
            "Q2 financial report with revenue analysis and projections.",
            "2 weeks ago",
            4,
        ),
        (
            "Marketing Strategy",
            "Digital marketing plan for the upcoming product launch.",
            "3 weeks ago",
            2,
        ),
    ];

    seeds
        .iter()
        .enumerate()
        .map(|(index, (title, content, last_edited, collaborators))| Document {
            id: (index + 1).to_string(),
            title: (*title).to_string(),
            content: (*content).to_string(),
            excerpt: derive_excerpt(content),
            last_edited: (*last_edited).to_string(),
            collaborators: *collaborators,
            share_id: None,
            is_public: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_content_has_no_marker() {
        let content = "Hello";
        assert_eq!(derive_excerpt(content), "Hello");
    }

    #[test]
    fn test_excerpt_exactly_at_limit_has_no_marker() {
        let content = "x".repeat(EXCERPT_LENGTH);
        assert_eq!(derive_excerpt(&content), content);
    }

    #[test]
    fn test_excerpt_over_limit_is_truncated_with_marker() {
        let content = "y".repeat(EXCERPT_LENGTH + 1);
        let excerpt = derive_excerpt(&content);
        assert_eq!(excerpt.chars().count(), EXCERPT_LENGTH + EXCERPT_MARKER.len());
        assert!(excerpt.ends_with(EXCERPT_MARKER));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let content = "é".repeat(EXCERPT_LENGTH);
        assert_eq!(derive_excerpt(&content), content);
    }

    #[test]
    fn test_new_local_defaults() {
        let doc = Document::new_local(None, None);
        assert_eq!(doc.title, UNTITLED_TITLE);
        assert_eq!(doc.content, "");
        assert_eq!(doc.excerpt, "");
        assert_eq!(doc.last_edited, JUST_NOW);
        assert_eq!(doc.collaborators, 0);
        assert!(doc.share_id.is_none());
        assert!(!doc.is_public);
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn test_apply_update_content_recomputes_excerpt() {
        let mut doc = Document::new_local(Some("Notes"), Some("Hello"));
        doc.last_edited = "Yesterday".to_string();
        doc.apply_update(&DocumentUpdate::content("Fresh content"));
        assert_eq!(doc.content, "Fresh content");
        assert_eq!(doc.excerpt, "Fresh content");
        assert_eq!(doc.title, "Notes");
        assert_eq!(doc.last_edited, JUST_NOW);
    }

    #[test]
    fn test_apply_update_empty_content_still_recomputes_excerpt() {
        let mut doc = Document::new_local(Some("Notes"), Some("Hello"));
        doc.apply_update(&DocumentUpdate::content(""));
        assert_eq!(doc.content, "");
        assert_eq!(doc.excerpt, "");
    }

    #[test]
    fn test_apply_update_title_leaves_content_untouched() {
        let mut doc = Document::new_local(Some("Notes"), Some("Hello"));
        doc.apply_update(&DocumentUpdate::title("Renamed"));
        assert_eq!(doc.title, "Renamed");
        assert_eq!(doc.content, "Hello");
        assert_eq!(doc.excerpt, "Hello");
    }

    #[test]
    fn test_sample_documents_have_unique_ids_and_derived_excerpts() {
        let docs = sample_documents();
        assert_eq!(docs.len(), 6);
        for doc in &docs {
            assert_eq!(doc.excerpt, derive_excerpt(&doc.content));
        }
        let mut ids: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }
}
