//! Promptstash Storage - Store Trait and In-Memory Implementation
//!
//! Defines the keyed persistence abstraction consumed by the editor and
//! library crates. The store is deliberately opaque: an embedded database, a
//! document store, or the in-memory table below can all sit behind
//! [`PromptStore`].

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use promptstash_core::{Category, CategoryId, Prompt, PromptId, StashResult};

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    /// New display name
    pub name: Option<String>,
    /// New icon identifier
    pub icon: Option<String>,
    /// New sidebar position
    pub display_order: Option<i16>,
}

// ============================================================================
// STORAGE TRAIT
// ============================================================================

/// Async storage trait for prompt and category persistence.
///
/// Prompts are written whole via [`prompt_upsert`](Self::prompt_upsert); the
/// save coordinator owns field-level merging. Deleting a category detaches
/// its prompts (cascade-nullify) before the call returns, so the effect is
/// observable through [`prompt_fetch`](Self::prompt_fetch) immediately.
///
/// The store may be mutated concurrently by several collaborators (an edit
/// session flushing, a list view deleting). Callers that care about
/// existence must re-check it at the time of use rather than caching it.
#[async_trait]
pub trait PromptStore: Send + Sync {
    // === Prompt Operations ===

    /// Report whether a prompt currently exists under this key.
    async fn prompt_exists(&self, id: PromptId) -> StashResult<bool>;

    /// Get a prompt by ID.
    async fn prompt_fetch(&self, id: PromptId) -> StashResult<Option<Prompt>>;

    /// Insert or replace a prompt under its own key.
    async fn prompt_upsert(&self, prompt: &Prompt) -> StashResult<()>;

    /// Delete a prompt. Errors with `NotFound` when the key is absent.
    async fn prompt_delete(&self, id: PromptId) -> StashResult<()>;

    /// List all prompts.
    async fn prompt_list(&self) -> StashResult<Vec<Prompt>>;

    /// List prompts referencing a category.
    async fn prompt_list_by_category(&self, category_id: CategoryId)
        -> StashResult<Vec<Prompt>>;

    /// List favorited prompts.
    async fn prompt_list_favorites(&self) -> StashResult<Vec<Prompt>>;

    // === Category Operations ===

    /// Insert a new category.
    async fn category_insert(&self, category: &Category) -> StashResult<()>;

    /// Get a category by ID.
    async fn category_fetch(&self, id: CategoryId) -> StashResult<Option<Category>>;

    /// List all categories ordered by display order.
    async fn category_list(&self) -> StashResult<Vec<Category>>;

    /// Update a category in place.
    async fn category_update(&self, id: CategoryId, update: CategoryUpdate) -> StashResult<()>;

    /// Delete a category, nullifying the category reference on every prompt
    /// that pointed at it.
    async fn category_delete(&self, id: CategoryId) -> StashResult<()>;
}
