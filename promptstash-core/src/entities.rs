//! Core entity structures

use crate::{new_entity_id, CategoryId, PromptId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum length of a prompt body preview, in characters.
const PREVIEW_MAX_CHARS: usize = 100;

/// Entity kind discriminator for errors and polymorphic references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Prompt,
    Category,
}

/// Prompt - a small text record owned by the store.
///
/// The edit session works on a copy of these fields, never on a live
/// reference; `updated_at` is stamped only on committed mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub prompt_id: PromptId,
    pub title: String,
    pub body: String,
    pub favorite: bool,
    /// Weak reference by key; the category does not own the prompt.
    pub category_id: Option<CategoryId>,
    /// Immutable after creation.
    pub created_at: Timestamp,
    /// Refreshed on every committed mutation.
    pub updated_at: Timestamp,
}

impl Prompt {
    /// Create a new prompt with freshly stamped timestamps.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category_id: Option<CategoryId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            prompt_id: new_entity_id(),
            title: title.into(),
            body: body.into(),
            favorite: false,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Trimmed body truncated for list rows.
    pub fn preview(&self) -> String {
        let trimmed = self.body.trim();
        if trimmed.chars().count() <= PREVIEW_MAX_CHARS {
            return trimmed.to_string();
        }
        let mut preview: String = trimmed.chars().take(PREVIEW_MAX_CHARS).collect();
        preview.push_str("...");
        preview
    }

    /// Copy of this prompt under a new identity: " (Copy)" title suffix,
    /// favorite reset, fresh timestamps.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            prompt_id: new_entity_id(),
            title: format!("{} (Copy)", self.title),
            body: self.body.clone(),
            favorite: false,
            category_id: self.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Category - groups zero-to-many prompts by reference.
///
/// Deleting a category detaches its prompts (cascade-nullify); it never
/// deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    /// Icon identifier for the sidebar.
    pub icon: String,
    /// Stable sidebar ordering; not required unique.
    pub display_order: i16,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, display_order: i16) -> Self {
        Self {
            category_id: new_entity_id(),
            name: name.into(),
            icon: icon.into(),
            display_order,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new("", "folder", 0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prompt_has_matching_timestamps() {
        let p = Prompt::new("Title", "Body", None);
        assert_eq!(p.created_at, p.updated_at);
        assert!(!p.favorite);
        assert!(p.category_id.is_none());
    }

    #[test]
    fn preview_short_body_is_trimmed_whole() {
        let p = Prompt::new("T", "  hello world  \n", None);
        assert_eq!(p.preview(), "hello world");
    }

    #[test]
    fn preview_long_body_is_truncated_with_ellipsis() {
        let p = Prompt::new("T", "x".repeat(250), None);
        let preview = p.preview();
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn duplicate_gets_new_identity_and_copy_suffix() {
        let mut p = Prompt::new("Review", "Body", Some(new_entity_id()));
        p.favorite = true;
        let copy = p.duplicate();
        assert_ne!(copy.prompt_id, p.prompt_id);
        assert_eq!(copy.title, "Review (Copy)");
        assert_eq!(copy.body, p.body);
        assert_eq!(copy.category_id, p.category_id);
        assert!(!copy.favorite);
    }

    #[test]
    fn category_defaults_to_folder_icon() {
        let c = Category::default();
        assert_eq!(c.icon, "folder");
        assert_eq!(c.display_order, 0);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn preview_never_exceeds_limit(body in ".{0,400}") {
            let p = Prompt::new("T", body, None);
            prop_assert!(p.preview().chars().count() <= PREVIEW_MAX_CHARS + 3);
        }

        #[test]
        fn preview_has_no_surrounding_whitespace(body in "\\s{0,5}.{0,200}\\s{0,5}") {
            let p = Prompt::new("T", body, None);
            let preview = p.preview();
            prop_assert_eq!(preview.trim().len(), preview.len());
        }

        #[test]
        fn duplicate_preserves_body_and_resets_favorite(
            title in ".{0,60}",
            body in ".{0,200}",
            favorite in any::<bool>(),
        ) {
            let mut p = Prompt::new(title, body, None);
            p.favorite = favorite;
            let copy = p.duplicate();
            prop_assert_eq!(copy.body, p.body);
            prop_assert_ne!(copy.prompt_id, p.prompt_id);
            prop_assert!(!copy.favorite);
        }
    }
}
