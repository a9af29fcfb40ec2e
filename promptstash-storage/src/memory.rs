//! In-memory store backed by hash maps.
//!
//! Used as the test double for the coordinator and as a real store for
//! in-memory sessions (previews, scratch libraries).

use crate::{CategoryUpdate, PromptStore};
use async_trait::async_trait;
use promptstash_core::{
    Category, CategoryId, EntityKind, Prompt, PromptId, StashResult, StorageError,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory keyed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prompts: Arc<RwLock<HashMap<PromptId, Prompt>>>,
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.prompts.write().unwrap_or_else(PoisonError::into_inner).clear();
        self.categories.write().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Get count of stored prompts.
    pub fn prompt_count(&self) -> usize {
        self.prompts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Get count of stored categories.
    pub fn category_count(&self) -> usize {
        self.categories.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

fn poisoned<T>(_: T) -> promptstash_core::StashError {
    StorageError::LockPoisoned.into()
}

#[async_trait]
impl PromptStore for MemoryStore {
    // === Prompt Operations ===

    async fn prompt_exists(&self, id: PromptId) -> StashResult<bool> {
        let prompts = self.prompts.read().map_err(poisoned)?;
        Ok(prompts.contains_key(&id))
    }

    async fn prompt_fetch(&self, id: PromptId) -> StashResult<Option<Prompt>> {
        let prompts = self.prompts.read().map_err(poisoned)?;
        Ok(prompts.get(&id).cloned())
    }

    async fn prompt_upsert(&self, prompt: &Prompt) -> StashResult<()> {
        let mut prompts = self.prompts.write().map_err(poisoned)?;
        prompts.insert(prompt.prompt_id, prompt.clone());
        Ok(())
    }

    async fn prompt_delete(&self, id: PromptId) -> StashResult<()> {
        let mut prompts = self.prompts.write().map_err(poisoned)?;
        prompts.remove(&id).ok_or(StorageError::NotFound {
            entity_kind: EntityKind::Prompt,
            id,
        })?;
        Ok(())
    }

    async fn prompt_list(&self) -> StashResult<Vec<Prompt>> {
        let prompts = self.prompts.read().map_err(poisoned)?;
        Ok(prompts.values().cloned().collect())
    }

    async fn prompt_list_by_category(
        &self,
        category_id: CategoryId,
    ) -> StashResult<Vec<Prompt>> {
        let prompts = self.prompts.read().map_err(poisoned)?;
        Ok(prompts
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }

    async fn prompt_list_favorites(&self) -> StashResult<Vec<Prompt>> {
        let prompts = self.prompts.read().map_err(poisoned)?;
        Ok(prompts.values().filter(|p| p.favorite).cloned().collect())
    }

    // === Category Operations ===

    async fn category_insert(&self, category: &Category) -> StashResult<()> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        categories.insert(category.category_id, category.clone());
        Ok(())
    }

    async fn category_fetch(&self, id: CategoryId) -> StashResult<Option<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        Ok(categories.get(&id).cloned())
    }

    async fn category_list(&self) -> StashResult<Vec<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(all)
    }

    async fn category_update(&self, id: CategoryId, update: CategoryUpdate) -> StashResult<()> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        let category = categories.get_mut(&id).ok_or(StorageError::NotFound {
            entity_kind: EntityKind::Category,
            id,
        })?;

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(icon) = update.icon {
            category.icon = icon;
        }
        if let Some(display_order) = update.display_order {
            category.display_order = display_order;
        }

        Ok(())
    }

    async fn category_delete(&self, id: CategoryId) -> StashResult<()> {
        // Cascade-nullify referencing prompts before removing the category,
        // so fetches observe the detachment as soon as this returns.
        let mut prompts = self.prompts.write().map_err(poisoned)?;
        let mut categories = self.categories.write().map_err(poisoned)?;

        categories.remove(&id).ok_or(StorageError::NotFound {
            entity_kind: EntityKind::Category,
            id,
        })?;

        for prompt in prompts.values_mut() {
            if prompt.category_id == Some(id) {
                prompt.category_id = None;
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_then_fetch_roundtrips() {
        let store = MemoryStore::new();
        let prompt = Prompt::new("Title", "Body", None);

        store.prompt_upsert(&prompt).await.unwrap();
        let fetched = store.prompt_fetch(prompt.prompt_id).await.unwrap();
        assert_eq!(fetched, Some(prompt));
    }

    #[tokio::test]
    async fn exists_tracks_delete() {
        let store = MemoryStore::new();
        let prompt = Prompt::new("Title", "Body", None);
        store.prompt_upsert(&prompt).await.unwrap();
        assert!(store.prompt_exists(prompt.prompt_id).await.unwrap());

        store.prompt_delete(prompt.prompt_id).await.unwrap();
        assert!(!store.prompt_exists(prompt.prompt_id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_prompt_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .prompt_delete(promptstash_core::new_entity_id())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            promptstash_core::StashError::Storage(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn category_delete_nullifies_references() {
        let store = MemoryStore::new();
        let category = Category::new("Coding", "chevron", 0);
        store.category_insert(&category).await.unwrap();

        let attached = Prompt::new("Attached", "", Some(category.category_id));
        let detached = Prompt::new("Detached", "", None);
        store.prompt_upsert(&attached).await.unwrap();
        store.prompt_upsert(&detached).await.unwrap();

        store.category_delete(category.category_id).await.unwrap();

        // Prompt survives with its category reference cleared.
        let survivor = store
            .prompt_fetch(attached.prompt_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(survivor.category_id, None);
        assert_eq!(store.prompt_count(), 2);
        assert_eq!(store.category_count(), 0);
    }

    #[tokio::test]
    async fn category_list_orders_by_display_order() {
        let store = MemoryStore::new();
        store
            .category_insert(&Category::new("Writing", "pencil", 2))
            .await
            .unwrap();
        store
            .category_insert(&Category::new("Coding", "chevron", 0))
            .await
            .unwrap();
        store
            .category_insert(&Category::new("Analysis", "chart", 1))
            .await
            .unwrap();

        let names: Vec<String> = store
            .category_list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Coding", "Analysis", "Writing"]);
    }

    #[tokio::test]
    async fn category_update_applies_partial_fields() {
        let store = MemoryStore::new();
        let category = Category::new("Coding", "chevron", 0);
        store.category_insert(&category).await.unwrap();

        store
            .category_update(
                category.category_id,
                CategoryUpdate {
                    icon: Some("terminal".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = store
            .category_fetch(category.category_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.icon, "terminal");
        assert_eq!(updated.name, "Coding");
    }

    #[tokio::test]
    async fn favorites_listing_filters() {
        let store = MemoryStore::new();
        let mut fav = Prompt::new("Fav", "", None);
        fav.favorite = true;
        store.prompt_upsert(&fav).await.unwrap();
        store
            .prompt_upsert(&Prompt::new("Plain", "", None))
            .await
            .unwrap();

        let favorites = store.prompt_list_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "Fav");
    }
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================
