//! Core store operations.
//!
//! Every operation takes `&impl ToolContext` and never fails outward: errors
//! are logged and collapsed into a default value (`false`, an empty list, or
//! header-only context text).

use mnemo_types::AccessMatch;
use std::sync::Arc;

use crate::db::pool::DatabasePool;

mod format;
mod memory;

#[cfg(test)]
pub(crate) mod test_utils;

pub use format::{CONTEXT_HEADER, SEPARATOR_WIDTH, format_memories_for_context};
pub use memory::{
    DEFAULT_LIMIT, get_recent_memories, load_all_memories, load_category_memories,
    load_memories_to_context, search_memories, store_memory, try_get_recent_memories,
    try_search_memories, try_store_memory,
};

/// Common context required by all operations.
/// Implemented by MnemoServer (MCP) and the test contexts.
pub trait ToolContext: Send + Sync {
    /// Connection pool for the memories database
    fn pool(&self) -> &Arc<DatabasePool>;

    /// How recent-memory listings pick the rows to mark as accessed
    fn access_match(&self) -> AccessMatch {
        AccessMatch::Content
    }
}
