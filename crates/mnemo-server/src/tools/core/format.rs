// crates/mnemo-server/src/tools/core/format.rs
// Render memories as a plain-text context block

use mnemo_types::MemoryView;
use std::fmt::Write;

/// First line of every context block, followed by a blank line
pub const CONTEXT_HEADER: &str = "Previous Learnings and Context:\n\n";

/// Number of dashes closing each memory entry
pub const SEPARATOR_WIDTH: usize = 40;

/// Format memories for injection into a conversation.
///
/// Entries keep the input order. An empty slice yields just the header.
pub fn format_memories_for_context(memories: &[MemoryView]) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::from(CONTEXT_HEADER);

    for memory in memories {
        let _ = writeln!(out, "Category: {}", memory.category);
        let _ = writeln!(out, "Content: {}", memory.content);
        let _ = writeln!(out, "Last Used: {}", memory.stored_at);
        let _ = writeln!(out, "{}", separator);
    }

    out
}
