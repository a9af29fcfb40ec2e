//! Debounce scheduler: one cancellable countdown per edit stream.
//!
//! `notify` (re)arms a single timer of fixed quiet duration; only the last
//! notification within any quiet window survives to fire. Expiry delivers the
//! armed token on a channel drained by the session worker, keeping the caller
//! non-blocking.

use promptstash_core::Generation;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Single-timer debounce scheduler.
///
/// Reusable across successive bindings of one session: `rearm` invalidates
/// the old countdown without leaking its timer task.
#[derive(Debug)]
pub struct DebounceScheduler {
    quiet_period: Duration,
    /// Liveness epoch. A timer captures the epoch at arm time and refuses to
    /// fire if it changed by expiry, so a countdown still sleeping when
    /// `cancel` runs is suppressed. The check races with a concurrent
    /// `cancel` between load and send; a token that slips through carries a
    /// superseded generation and is dropped at the flush side.
    epoch: Arc<AtomicU64>,
    armed: Mutex<Option<JoinHandle<()>>>,
    tx: mpsc::UnboundedSender<Generation>,
}

impl DebounceScheduler {
    /// Create a scheduler and the receiver its expirations are delivered on.
    pub fn new(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<Generation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            quiet_period,
            epoch: Arc::new(AtomicU64::new(0)),
            armed: Mutex::new(None),
            tx,
        };
        (scheduler, rx)
    }

    /// (Re)arm the countdown. A previously armed countdown is discarded, so
    /// at most one expiry fires per quiet window, carrying the last token.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, token: Generation) {
        let mut armed = self.armed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = armed.take() {
            previous.abort();
        }

        let armed_epoch = self.epoch.load(Ordering::SeqCst);
        let epoch = Arc::clone(&self.epoch);
        let tx = self.tx.clone();
        let quiet_period = self.quiet_period;

        *armed = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if epoch.load(Ordering::SeqCst) == armed_epoch {
                // Receiver gone means the session worker stopped; nothing to do.
                let _ = tx.send(token);
            }
        }));
    }

    /// Discard any armed countdown. Suppression is best-effort at this
    /// layer; the generation comparison in the flush path is authoritative.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let mut armed = self.armed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = armed.take() {
            previous.abort();
        }
    }

    /// Reset for a new binding. Equivalent to `cancel`; the epoch bump is the
    /// state reset.
    pub fn rearm(&self) {
        self.cancel();
    }

    /// Whether a countdown is currently armed (it may have already expired).
    pub fn is_armed(&self) -> bool {
        self.armed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

// ============================================================================
// TESTS
// ============================================================================
