// db/mod.rs
// Storage layer: pooled rusqlite connections over the memories table

mod memory;
pub mod pool;
mod schema;
#[cfg(test)]
pub(crate) mod test_support;

pub use memory::{
    count_memories_sync, get_memory_sync, parse_memory_view_row, recent_memories_sync,
    search_memories_sync, store_memory_sync,
};
pub use pool::DatabasePool;
pub use schema::{SCHEMA, run_migrations, table_exists};
