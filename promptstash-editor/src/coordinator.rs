//! Save coordinator: the only writer to the store on behalf of an edit
//! session, and the only resolver of identity races.
//!
//! All operations serialize through one `tokio::sync::Mutex`, held across the
//! store await. That gives the single coordination context the design needs:
//! no two flushes in flight for one session, and a flush capture that is
//! atomic with respect to rebinding.

use crate::debounce::DebounceScheduler;
use crate::draft::{DraftBuffer, DraftField};
use chrono::Utc;
use promptstash_core::{Generation, Prompt, PromptId, StashError, StashResult};
use promptstash_storage::PromptStore;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// Token identifying "the draft bound to prompt X, generation G".
///
/// A debounced timer carries the generation it was armed under; the
/// coordinator compares it against the live generation before any store
/// access, making staleness a pure value comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteTicket {
    pub prompt_id: PromptId,
    pub generation: Generation,
}

/// What a flush attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Dirty draft committed; `updated_at` stamped.
    Written,
    /// Nothing to do; draft was clean (or unbound).
    Clean,
    /// Target deleted concurrently; draft discarded silently.
    RecordGone,
    /// Ticket belonged to a superseded binding; dropped before any store
    /// access. Internal signal, never surfaced as an error.
    Stale,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    buffer: DraftBuffer,
    generation: Generation,
}

/// Debounced, identity-aware persistence coordinator for one edit session.
pub struct SaveCoordinator<S: PromptStore + ?Sized> {
    store: Arc<S>,
    scheduler: DebounceScheduler,
    state: Mutex<CoordinatorState>,
    /// Most recent persistence failure, reportable to the UI without
    /// blocking the action that triggered it.
    last_error: StdMutex<Option<StashError>>,
}

impl<S: PromptStore + ?Sized> SaveCoordinator<S> {
    pub fn new(store: Arc<S>, scheduler: DebounceScheduler) -> Self {
        Self {
            store,
            scheduler,
            state: Mutex::new(CoordinatorState::default()),
            last_error: StdMutex::new(None),
        }
    }

    /// Bind the session to a prompt.
    ///
    /// Cancels the outstanding countdown, flushes whatever draft was
    /// previously bound (a write failure there is recorded, not fatal -
    /// the old draft is destroyed after the attempt either way), then loads
    /// the new prompt's persisted fields as the clean baseline under a fresh
    /// generation.
    pub async fn bind(&self, prompt_id: PromptId) -> StashResult<()> {
        self.scheduler.rearm();
        let mut state = self.state.lock().await;

        if state.buffer.is_dirty() {
            if let Err(e) = self.flush_locked(&mut state, true).await {
                warn!(error = %e, "flush-before-switch failed; draft dropped");
                self.record_error(e);
            }
        }

        // New generation even if the bind fails below: any ticket still in
        // flight for the old binding must not find itself current again.
        state.generation += 1;
        state.buffer.clear();

        let baseline = self.store.prompt_fetch(prompt_id).await?.ok_or(
            promptstash_core::StorageError::NotFound {
                entity_kind: promptstash_core::EntityKind::Prompt,
                id: prompt_id,
            },
        )?;
        state.buffer.bind(&baseline);
        debug!(prompt_id = %prompt_id, generation = state.generation, "draft bound");
        Ok(())
    }

    /// Apply a high-frequency edit (title/body keystrokes): mark dirty and
    /// (re)arm the quiet-period countdown. Returns without touching the
    /// store.
    pub async fn field_changed(&self, field: DraftField) {
        let mut state = self.state.lock().await;
        if state.buffer.set(field) {
            self.scheduler.notify(state.generation);
        } else {
            debug!("edit ignored; no draft bound");
        }
    }

    /// Apply a discrete edit (favorite, category) and flush at once.
    pub async fn field_changed_immediate(&self, field: DraftField) -> StashResult<FlushOutcome> {
        let mut state = self.state.lock().await;
        if !state.buffer.set(field) {
            debug!("edit ignored; no draft bound");
            return Ok(FlushOutcome::Clean);
        }
        self.flush_locked(&mut state, false).await
    }

    /// Flip the draft's favorite flag and flush at once.
    pub async fn favorite_toggled(&self) -> StashResult<FlushOutcome> {
        let mut state = self.state.lock().await;
        let Some(current) = state.buffer.favorite() else {
            debug!("favorite toggle ignored; no draft bound");
            return Ok(FlushOutcome::Clean);
        };
        state.buffer.set(DraftField::Favorite(!current));
        self.flush_locked(&mut state, false).await
    }

    /// Explicit flush. Explicit flushes target whatever is current at call
    /// time and are themselves the authority; only the debounced path
    /// ([`flush_due`](Self::flush_due)) is subject to staleness checks.
    pub async fn flush(&self, is_final: bool) -> StashResult<FlushOutcome> {
        if is_final {
            self.scheduler.cancel();
        }
        let mut state = self.state.lock().await;
        self.flush_locked(&mut state, is_final).await
    }

    /// Debounced-timer entry point: flush only if the ticket's generation is
    /// still current. A stale ticket is dropped before any store access.
    pub async fn flush_due(&self, generation: Generation) -> StashResult<FlushOutcome> {
        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(
                ticket_generation = generation,
                live_generation = state.generation,
                "stale debounced flush dropped"
            );
            return Ok(FlushOutcome::Stale);
        }
        self.flush_locked(&mut state, false).await
    }

    /// Release the binding: final flush, then unbind.
    ///
    /// Idempotent: a second call finds a clean, unbound buffer and performs
    /// no write.
    pub async fn unbind(&self) -> StashResult<FlushOutcome> {
        self.scheduler.cancel();
        let mut state = self.state.lock().await;
        let outcome = self.flush_locked(&mut state, true).await;
        state.buffer.clear();
        state.generation += 1;
        outcome
    }

    /// Abandon the draft without flushing (the record itself was deleted by
    /// the user, or the edit was explicitly discarded).
    pub async fn discard(&self) {
        self.scheduler.cancel();
        let mut state = self.state.lock().await;
        state.buffer.clear();
        state.generation += 1;
        debug!(generation = state.generation, "draft discarded");
    }

    /// Identity currently bound, if any.
    pub async fn bound_prompt(&self) -> Option<PromptId> {
        self.state.lock().await.buffer.bound_id()
    }

    /// Whether unflushed edits exist.
    pub async fn is_dirty(&self) -> bool {
        self.state.lock().await.buffer.is_dirty()
    }

    /// Current generation, for arming tickets in tests.
    pub async fn generation(&self) -> Generation {
        self.state.lock().await.generation
    }

    /// Most recent recorded persistence failure, if any. Reading clears it.
    pub fn take_last_error(&self) -> Option<StashError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn record_error(&self, error: StashError) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Commit the dirty draft while holding the state lock.
    ///
    /// Existence is re-checked against the store here, never trusted from a
    /// cached flag: deletion can race with a pending debounced write. A
    /// write failure leaves the draft dirty so the next edit or session
    /// boundary retries naturally.
    async fn flush_locked(
        &self,
        state: &mut CoordinatorState,
        is_final: bool,
    ) -> StashResult<FlushOutcome> {
        if !state.buffer.is_dirty() {
            return Ok(FlushOutcome::Clean);
        }
        let Some(draft) = state.buffer.snapshot() else {
            return Ok(FlushOutcome::Clean);
        };
        let ticket = WriteTicket {
            prompt_id: draft.prompt_id,
            generation: state.generation,
        };

        if !self.store.prompt_exists(ticket.prompt_id).await? {
            debug!(
                prompt_id = %ticket.prompt_id,
                generation = ticket.generation,
                "flush target gone; draft discarded"
            );
            state.buffer.clear();
            return Ok(FlushOutcome::RecordGone);
        }

        let created_at = state.buffer.baseline_created_at().unwrap_or_else(Utc::now);
        let record = Prompt {
            prompt_id: draft.prompt_id,
            title: draft.title,
            body: draft.body,
            favorite: draft.favorite,
            category_id: draft.category_id,
            created_at,
            updated_at: Utc::now(),
        };

        self.store.prompt_upsert(&record).await?;
        state.buffer.mark_clean();
        trace!(
            prompt_id = %ticket.prompt_id,
            generation = ticket.generation,
            is_final,
            "draft flushed"
        );
        Ok(FlushOutcome::Written)
    }
}

// ============================================================================
// TESTS
// ============================================================================
