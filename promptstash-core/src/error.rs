//! Error types for promptstash operations

use crate::EntityKind;
use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity_kind:?} with id {id}")]
    NotFound { entity_kind: EntityKind, id: Uuid },

    #[error("Write failed for {entity_kind:?} with id {id}: {reason}")]
    WriteFailed {
        entity_kind: EntityKind,
        id: Uuid,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Master error type for all promptstash errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StashError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for promptstash operations.
pub type StashResult<T> = Result<T, StashError>;

// ============================================================================
// TESTS
// ============================================================================
