//! Promptstash Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic, no I/O.

pub mod entities;
pub mod error;
pub mod identity;

pub use entities::{Category, EntityKind, Prompt};
pub use error::{StashError, StashResult, StorageError};
pub use identity::{new_entity_id, CategoryId, Generation, PromptId, Timestamp};
