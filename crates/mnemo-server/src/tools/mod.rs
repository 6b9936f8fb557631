//! crates/mnemo-server/src/tools/mod.rs
//! Memory store operations shared by the MCP server and the CLI

pub mod core;

// Re-export public API for the MCP router, CLI dispatcher, and integration tests
pub use core::{
    DEFAULT_LIMIT, ToolContext, format_memories_for_context, get_recent_memories,
    load_all_memories, load_category_memories, load_memories_to_context, search_memories,
    store_memory,
};
