//! Category CRUD. Deleting a category detaches its prompts; the nullify
//! cascade itself lives in the store.

use promptstash_core::{Category, CategoryId, StashResult};
use promptstash_storage::{CategoryUpdate, PromptStore};
use std::sync::Arc;
use tracing::debug;

/// Category operations over one store.
pub struct CategoryOps<S: PromptStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PromptStore + ?Sized> CategoryOps<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a category at the end of the sidebar.
    pub async fn create(
        &self,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> StashResult<Category> {
        let next_order = self
            .store
            .category_list()
            .await?
            .iter()
            .map(|c| c.display_order)
            .max()
            .map_or(0, |max| max + 1);

        let category = Category::new(name, icon, next_order);
        self.store.category_insert(&category).await?;
        debug!(category_id = %category.category_id, "category created");
        Ok(category)
    }

    pub async fn rename(&self, id: CategoryId, name: impl Into<String>) -> StashResult<()> {
        self.store
            .category_update(
                id,
                CategoryUpdate {
                    name: Some(name.into()),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn set_icon(&self, id: CategoryId, icon: impl Into<String>) -> StashResult<()> {
        self.store
            .category_update(
                id,
                CategoryUpdate {
                    icon: Some(icon.into()),
                    ..Default::default()
                },
            )
            .await
    }

    /// Delete a category; its prompts survive, detached.
    pub async fn delete(&self, id: CategoryId) -> StashResult<()> {
        self.store.category_delete(id).await?;
        debug!(category_id = %id, "category deleted");
        Ok(())
    }

    /// All categories in sidebar order.
    pub async fn list(&self) -> StashResult<Vec<Category>> {
        self.store.category_list().await
    }
}

// ============================================================================
// TESTS
// ============================================================================
