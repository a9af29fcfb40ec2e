//! Edit session controller: the public surface the rest of the application
//! drives.
//!
//! State machine: Unbound -> Bound(generation G) -> Unbound. `open` flushes
//! any prior bound state first; `close` performs a final flush and releases
//! the binding. Title/body edits go through the debounce path; favorite and
//! category changes are discrete, low-frequency actions and flush
//! immediately.

use crate::config::EditorConfig;
use crate::coordinator::SaveCoordinator;
use crate::debounce::DebounceScheduler;
use crate::draft::DraftField;
use promptstash_core::{CategoryId, Generation, PromptId, StashError, StashResult};
use promptstash_storage::PromptStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// An editing session over one store.
///
/// Owns the worker task that applies debounced flushes; dropping the session
/// aborts it. The session is reusable: `close` releases the current binding
/// and a later `open` starts a fresh one.
pub struct EditorSession<S: PromptStore + ?Sized + 'static> {
    coordinator: Arc<SaveCoordinator<S>>,
    worker: JoinHandle<()>,
}

impl<S: PromptStore + ?Sized + 'static> EditorSession<S> {
    /// Create a session. Must be called from within a tokio runtime.
    pub fn new(store: Arc<S>, config: EditorConfig) -> Self {
        let (scheduler, rx) = DebounceScheduler::new(config.quiet_period);
        let coordinator = Arc::new(SaveCoordinator::new(store, scheduler));
        let worker = tokio::spawn(drain_expirations(Arc::clone(&coordinator), rx));
        Self {
            coordinator,
            worker,
        }
    }

    /// Open a prompt for editing, flushing any previously bound draft first.
    ///
    /// Errors only when the prompt does not exist; a flush failure on the
    /// outgoing draft is recorded in [`last_save_error`](Self::last_save_error)
    /// instead of blocking the open.
    pub async fn open(&self, prompt_id: PromptId) -> StashResult<()> {
        self.coordinator.bind(prompt_id).await
    }

    /// Keystroke-frequency title edit; debounced.
    pub async fn title_changed(&self, text: impl Into<String>) {
        self.coordinator
            .field_changed(DraftField::Title(text.into()))
            .await;
    }

    /// Keystroke-frequency body edit; debounced.
    pub async fn body_changed(&self, text: impl Into<String>) {
        self.coordinator
            .field_changed(DraftField::Body(text.into()))
            .await;
    }

    /// Flip the favorite flag; flushes immediately, no debounce delay.
    pub async fn favorite_toggled(&self) -> StashResult<()> {
        match self.coordinator.favorite_toggled().await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.coordinator.record_error(e.clone());
                Err(e)
            }
        }
    }

    /// Move the prompt to a category (or detach it); flushes immediately.
    pub async fn category_changed(&self, category_id: Option<CategoryId>) -> StashResult<()> {
        match self
            .coordinator
            .field_changed_immediate(DraftField::Category(category_id))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                self.coordinator.record_error(e.clone());
                Err(e)
            }
        }
    }

    /// Final flush and release. Idempotent: a second call finds a clean,
    /// unbound draft and performs no write.
    pub async fn close(&self) -> StashResult<()> {
        match self.coordinator.unbind().await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.coordinator.record_error(e.clone());
                Err(e)
            }
        }
    }

    /// Abandon the current draft without flushing.
    pub async fn discard(&self) {
        self.coordinator.discard().await;
    }

    /// Prompt currently open, if any.
    pub async fn current_prompt(&self) -> Option<PromptId> {
        self.coordinator.bound_prompt().await
    }

    /// Whether unflushed edits exist.
    pub async fn is_dirty(&self) -> bool {
        self.coordinator.is_dirty().await
    }

    /// Most recent persistence failure that could not be returned to a
    /// caller (debounced flushes, flush-before-switch). Reading clears it.
    pub fn last_save_error(&self) -> Option<StashError> {
        self.coordinator.take_last_error()
    }
}

impl<S: PromptStore + ?Sized + 'static> Drop for EditorSession<S> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Worker loop: apply each expired countdown's ticket through the
/// staleness-checked flush path.
async fn drain_expirations<S: PromptStore + ?Sized>(
    coordinator: Arc<SaveCoordinator<S>>,
    mut rx: mpsc::UnboundedReceiver<Generation>,
) {
    while let Some(generation) = rx.recv().await {
        match coordinator.flush_due(generation).await {
            Ok(outcome) => trace!(?outcome, generation, "debounced flush applied"),
            Err(e) => {
                warn!(error = %e, generation, "debounced flush failed");
                coordinator.record_error(e);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
