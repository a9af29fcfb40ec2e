//! List-level prompt operations: create, delete, duplicate, favorite,
//! move-to-category.
//!
//! These are the coordinator's collaborators. They mutate the store directly
//! and synchronously from the caller's point of view; the edit session
//! re-checks existence at flush time precisely because these can race with a
//! pending debounced write.

use promptstash_core::{
    CategoryId, EntityKind, Prompt, PromptId, StashResult, StorageError,
};
use promptstash_storage::PromptStore;
use std::sync::Arc;
use tracing::debug;

/// Default title for prompts created from the list view.
const DEFAULT_TITLE: &str = "New Prompt";

/// Prompt list operations over one store.
pub struct PromptOps<S: PromptStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PromptStore + ?Sized> PromptOps<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a prompt with default fields, optionally inside a category.
    pub async fn create(&self, category_id: Option<CategoryId>) -> StashResult<Prompt> {
        let prompt = Prompt::new(DEFAULT_TITLE, "", category_id);
        self.store.prompt_upsert(&prompt).await?;
        debug!(prompt_id = %prompt.prompt_id, "prompt created");
        Ok(prompt)
    }

    /// Delete a prompt.
    pub async fn delete(&self, id: PromptId) -> StashResult<()> {
        self.store.prompt_delete(id).await?;
        debug!(prompt_id = %id, "prompt deleted");
        Ok(())
    }

    /// Copy a prompt under a new identity.
    pub async fn duplicate(&self, id: PromptId) -> StashResult<Prompt> {
        let original = self.fetch_existing(id).await?;
        let copy = original.duplicate();
        self.store.prompt_upsert(&copy).await?;
        debug!(source = %id, copy = %copy.prompt_id, "prompt duplicated");
        Ok(copy)
    }

    /// Flip the favorite flag, stamping `updated_at`.
    pub async fn toggle_favorite(&self, id: PromptId) -> StashResult<Prompt> {
        let mut prompt = self.fetch_existing(id).await?;
        prompt.favorite = !prompt.favorite;
        prompt.updated_at = chrono::Utc::now();
        self.store.prompt_upsert(&prompt).await?;
        Ok(prompt)
    }

    /// Move a prompt into a category (or detach it), stamping `updated_at`.
    pub async fn move_to_category(
        &self,
        id: PromptId,
        category_id: Option<CategoryId>,
    ) -> StashResult<Prompt> {
        let mut prompt = self.fetch_existing(id).await?;
        prompt.category_id = category_id;
        prompt.updated_at = chrono::Utc::now();
        self.store.prompt_upsert(&prompt).await?;
        Ok(prompt)
    }

    async fn fetch_existing(&self, id: PromptId) -> StashResult<Prompt> {
        self.store
            .prompt_fetch(id)
            .await?
            .ok_or_else(|| {
                StorageError::NotFound {
                    entity_kind: EntityKind::Prompt,
                    id,
                }
                .into()
            })
    }
}

// ============================================================================
// TESTS
// ============================================================================
