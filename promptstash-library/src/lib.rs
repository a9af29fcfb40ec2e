//! Promptstash Library - List and Category Operations
//!
//! The simple, synchronous-in-intent collaborators around the edit session:
//! list-level prompt CRUD, category management with cascade-nullify, and
//! pure search/sort over fetched slices. Nothing here debounces; the only
//! temporal hazards live in `promptstash-editor`.

pub mod categories;
pub mod prompts;
pub mod query;

pub use categories::CategoryOps;
pub use prompts::PromptOps;
pub use query::{filter, search, sort, Filter, SortOption};
