//! Promptstash Test Utilities
//!
//! Centralized test infrastructure for the promptstash workspace:
//! - Re-exported in-memory store
//! - Fixture builders for common entities
//! - A fault-injecting store wrapper for write-error paths

// Re-export the in-memory store from its source crate
pub use promptstash_storage::MemoryStore;

use async_trait::async_trait;
use promptstash_core::{
    Category, CategoryId, EntityKind, Prompt, PromptId, StashResult, StorageError,
};
use promptstash_storage::{CategoryUpdate, PromptStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// FIXTURES
// ============================================================================

/// A prompt with the given title and a short body.
pub fn sample_prompt(title: &str) -> Prompt {
    Prompt::new(title, format!("{title} body"), None)
}

/// A prompt attached to a category.
pub fn sample_prompt_in(title: &str, category_id: CategoryId) -> Prompt {
    Prompt::new(title, format!("{title} body"), Some(category_id))
}

/// A category with the default icon at the given position.
pub fn sample_category(name: &str, display_order: i16) -> Category {
    Category::new(name, "folder", display_order)
}

// ============================================================================
// FAULT-INJECTING STORE
// ============================================================================

/// Store wrapper that fails prompt writes on demand and counts the ones that
/// succeed. Reads and category operations delegate untouched.
#[derive(Debug)]
pub struct FlakyStore<S> {
    inner: Arc<S>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make subsequent prompt upserts fail (or stop failing).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of prompt upserts that reached the inner store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: PromptStore> PromptStore for FlakyStore<S> {
    async fn prompt_exists(&self, id: PromptId) -> StashResult<bool> {
        self.inner.prompt_exists(id).await
    }

    async fn prompt_fetch(&self, id: PromptId) -> StashResult<Option<Prompt>> {
        self.inner.prompt_fetch(id).await
    }

    async fn prompt_upsert(&self, prompt: &Prompt) -> StashResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                entity_kind: EntityKind::Prompt,
                id: prompt.prompt_id,
                reason: "injected failure".to_string(),
            }
            .into());
        }
        self.inner.prompt_upsert(prompt).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn prompt_delete(&self, id: PromptId) -> StashResult<()> {
        self.inner.prompt_delete(id).await
    }

    async fn prompt_list(&self) -> StashResult<Vec<Prompt>> {
        self.inner.prompt_list().await
    }

    async fn prompt_list_by_category(
        &self,
        category_id: CategoryId,
    ) -> StashResult<Vec<Prompt>> {
        self.inner.prompt_list_by_category(category_id).await
    }

    async fn prompt_list_favorites(&self) -> StashResult<Vec<Prompt>> {
        self.inner.prompt_list_favorites().await
    }

    async fn category_insert(&self, category: &Category) -> StashResult<()> {
        self.inner.category_insert(category).await
    }

    async fn category_fetch(&self, id: CategoryId) -> StashResult<Option<Category>> {
        self.inner.category_fetch(id).await
    }

    async fn category_list(&self) -> StashResult<Vec<Category>> {
        self.inner.category_list().await
    }

    async fn category_update(&self, id: CategoryId, update: CategoryUpdate) -> StashResult<()> {
        self.inner.category_update(id, update).await
    }

    async fn category_delete(&self, id: CategoryId) -> StashResult<()> {
        self.inner.category_delete(id).await
    }
}

// ============================================================================
// TESTS
// ============================================================================
