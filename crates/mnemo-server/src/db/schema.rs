// crates/mnemo-server/src/db/schema.rs
// Database schema

use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

/// Database schema SQL
pub const SCHEMA: &str = r#"
-- =======================================
-- MEMORY: categorized notes
-- =======================================
CREATE TABLE IF NOT EXISTS memories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    category TEXT,
    stored_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    last_accessed TIMESTAMP,
    access_count INTEGER DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_memories_stored_at ON memories(stored_at);
CREATE INDEX IF NOT EXISTS idx_memories_category ON memories(category, stored_at);
"#;

/// Create the memories table and its indexes if they are missing.
///
/// Idempotent, safe to run on every startup.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    debug!("Memory schema ensured");
    Ok(())
}

/// Check if a table exists in the database
pub fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?",
        [table_name],
        |_| Ok(true),
    )
    .unwrap_or(false)
}
