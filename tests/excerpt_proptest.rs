//! Property-based tests for excerpt derivation

use clouddocs::shared::document::{derive_excerpt, Document, DocumentUpdate, EXCERPT_LENGTH};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_excerpt_is_truncated_content(content in ".*") {
        let excerpt = derive_excerpt(&content);
        let length = content.chars().count();

        if length > EXCERPT_LENGTH {
            prop_assert!(excerpt.ends_with("..."));
            let prefix: String = content.chars().take(EXCERPT_LENGTH).collect();
            prop_assert_eq!(&excerpt[..excerpt.len() - 3], prefix.as_str());
        } else {
            prop_assert_eq!(excerpt, content);
        }
    }

    #[test]
    fn test_excerpt_never_exceeds_limit_plus_marker(content in ".*") {
        let excerpt = derive_excerpt(&content);
        prop_assert!(excerpt.chars().count() <= EXCERPT_LENGTH + 3);
    }

    #[test]
    fn test_applying_content_update_keeps_excerpt_derived(
        initial in ".*",
        replacement in ".*",
    ) {
        let mut doc = Document::new_local(None, Some(&initial));
        prop_assert_eq!(&doc.excerpt, &derive_excerpt(&doc.content));

        doc.apply_update(&DocumentUpdate::content(replacement));
        prop_assert_eq!(&doc.excerpt, &derive_excerpt(&doc.content));
    }
}
