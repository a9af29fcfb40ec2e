//! Identity types for promptstash entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prompt identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type PromptId = Uuid;

/// Category identifier.
pub type CategoryId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generation counter distinguishing successive bindings of an edit session.
/// Monotonic per session; stale asynchronous completions are detected by
/// comparing against the current value.
pub type Generation = u64;

/// Generate a new UUIDv7 entity id (timestamp-sortable).
pub fn new_entity_id() -> Uuid {
    Uuid::now_v7()
}
