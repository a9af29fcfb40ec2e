//! Promptstash Editor - Debounced Persistence Coordinator
//!
//! The temporal core of the workspace: coalesces keystroke-frequency edits
//! to the currently open prompt and commits them without losing data,
//! writing to the wrong record after a switch, or resurrecting a record
//! deleted while edits were pending.
//!
//! Layering, leaves first: [`DraftBuffer`] (pure in-memory edit state),
//! [`DebounceScheduler`] (one cancellable countdown per edit stream),
//! [`SaveCoordinator`] (identity races, generation tickets, the only store
//! writer), [`EditorSession`] (public surface and worker task).

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod draft;
pub mod session;

pub use config::EditorConfig;
pub use coordinator::{FlushOutcome, SaveCoordinator, WriteTicket};
pub use debounce::DebounceScheduler;
pub use draft::{Draft, DraftBuffer, DraftField};
pub use session::EditorSession;
