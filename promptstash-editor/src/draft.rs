//! In-memory draft of the prompt currently open for editing.
//!
//! The buffer holds a copy of the persisted fields, decoupled from the store
//! until the coordinator flushes it. Pure value semantics: no I/O, no timers,
//! dirty-tracking only.

use promptstash_core::{CategoryId, Prompt, PromptId, Timestamp};

/// A single field edit applied to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Title(String),
    Body(String),
    Favorite(bool),
    Category(Option<CategoryId>),
}

/// Snapshot of unflushed user intent for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub prompt_id: PromptId,
    pub title: String,
    pub body: String,
    pub favorite: bool,
    pub category_id: Option<CategoryId>,
}

/// Mutable draft buffer bound to at most one prompt identity at a time.
#[derive(Debug, Default)]
pub struct DraftBuffer {
    draft: Option<Draft>,
    /// Creation timestamp captured at bind time; immutable in the store, so
    /// safe to carry through to the upsert.
    created_at: Option<Timestamp>,
    dirty: bool,
}

impl DraftBuffer {
    /// Create an unbound, clean buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a prompt, loading its persisted fields as the clean baseline.
    pub fn bind(&mut self, baseline: &Prompt) {
        self.draft = Some(Draft {
            prompt_id: baseline.prompt_id,
            title: baseline.title.clone(),
            body: baseline.body.clone(),
            favorite: baseline.favorite,
            category_id: baseline.category_id,
        });
        self.created_at = Some(baseline.created_at);
        self.dirty = false;
    }

    /// Apply a field edit and mark the draft dirty.
    /// Returns false (and does nothing) when the buffer is unbound.
    pub fn set(&mut self, field: DraftField) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match field {
            DraftField::Title(title) => draft.title = title,
            DraftField::Body(body) => draft.body = body,
            DraftField::Favorite(favorite) => draft.favorite = favorite,
            DraftField::Category(category_id) => draft.category_id = category_id,
        }
        self.dirty = true;
        true
    }

    /// Current tuple, without side effects.
    pub fn snapshot(&self) -> Option<Draft> {
        self.draft.clone()
    }

    /// Identity this buffer is bound to, if any.
    pub fn bound_id(&self) -> Option<PromptId> {
        self.draft.as_ref().map(|d| d.prompt_id)
    }

    /// Creation timestamp of the bound prompt, captured at bind time.
    pub fn baseline_created_at(&self) -> Option<Timestamp> {
        self.created_at
    }

    /// Current favorite value, for toggle semantics.
    pub fn favorite(&self) -> Option<bool> {
        self.draft.as_ref().map(|d| d.favorite)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the draft clean without changing field values.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Reset to an unbound, clean state.
    pub fn clear(&mut self) {
        self.draft = None;
        self.created_at = None;
        self.dirty = false;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Prompt {
        Prompt::new("Title", "Body", None)
    }

    #[test]
    fn bind_loads_clean_baseline() {
        let prompt = baseline();
        let mut buffer = DraftBuffer::new();
        buffer.bind(&prompt);

        assert!(!buffer.is_dirty());
        assert_eq!(buffer.bound_id(), Some(prompt.prompt_id));
        let snap = buffer.snapshot().unwrap();
        assert_eq!(snap.title, "Title");
        assert_eq!(snap.body, "Body");
        assert_eq!(buffer.baseline_created_at(), Some(prompt.created_at));
    }

    #[test]
    fn set_marks_dirty_and_snapshot_has_no_side_effects() {
        let mut buffer = DraftBuffer::new();
        buffer.bind(&baseline());

        assert!(buffer.set(DraftField::Title("New".into())));
        assert!(buffer.is_dirty());

        let before = buffer.snapshot();
        let after = buffer.snapshot();
        assert_eq!(before, after);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn set_while_unbound_is_refused() {
        let mut buffer = DraftBuffer::new();
        assert!(!buffer.set(DraftField::Body("orphan".into())));
        assert!(!buffer.is_dirty());
        assert!(buffer.snapshot().is_none());
    }

    #[test]
    fn clear_resets_to_unbound_clean() {
        let mut buffer = DraftBuffer::new();
        buffer.bind(&baseline());
        buffer.set(DraftField::Favorite(true));

        buffer.clear();
        assert!(!buffer.is_dirty());
        assert!(buffer.bound_id().is_none());
        assert!(buffer.baseline_created_at().is_none());
    }

    #[test]
    fn rebind_replaces_identity_and_drops_dirty() {
        let first = baseline();
        let second = Prompt::new("Other", "", None);
        let mut buffer = DraftBuffer::new();

        buffer.bind(&first);
        buffer.set(DraftField::Title("edited".into()));
        buffer.bind(&second);

        assert!(!buffer.is_dirty());
        assert_eq!(buffer.bound_id(), Some(second.prompt_id));
        assert_eq!(buffer.snapshot().unwrap().title, "Other");
    }
}
