// crates/mnemo-server/src/tools/core/memory.rs
// Store, list, search, and load memories

use mnemo_types::{DEFAULT_CATEGORY, MemoryView};
use tracing::{debug, error};

use super::ToolContext;
use super::format::format_memories_for_context;
use crate::db::{recent_memories_sync, search_memories_sync, store_memory_sync};
use crate::error::MnemoError;
use crate::utils::now_timestamp;

/// Default number of rows for listing, search, and per-category loading
pub const DEFAULT_LIMIT: i64 = 5;

/// Store a new memory. Returns `false` (and logs) on any failure.
///
/// `None` stores under the default category. Content is not validated,
/// the empty string is a valid memory.
pub async fn store_memory<C: ToolContext>(
    ctx: &C,
    content: String,
    category: Option<String>,
) -> bool {
    match try_store_memory(ctx, content, category).await {
        Ok(id) => {
            debug!(id, "Stored memory");
            true
        }
        Err(e) => {
            error!(error = %e, "Error storing memory");
            false
        }
    }
}

/// Fallible form of [`store_memory`], returns the new row id
pub async fn try_store_memory<C: ToolContext>(
    ctx: &C,
    content: String,
    category: Option<String>,
) -> Result<i64, MnemoError> {
    let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let stored_at = now_timestamp();
    ctx.pool()
        .run(move |conn| store_memory_sync(conn, &content, &category, &stored_at))
        .await
}

/// Most recent memories, newest first, optionally restricted to one category.
///
/// Marks every returned memory as accessed. Returns an empty list on failure.
pub async fn get_recent_memories<C: ToolContext>(
    ctx: &C,
    limit: Option<i64>,
    category: Option<String>,
) -> Vec<MemoryView> {
    match try_get_recent_memories(ctx, limit, category).await {
        Ok(memories) => memories,
        Err(e) => {
            error!(error = %e, "Error retrieving memories");
            Vec::new()
        }
    }
}

/// Fallible form of [`get_recent_memories`]
pub async fn try_get_recent_memories<C: ToolContext>(
    ctx: &C,
    limit: Option<i64>,
    category: Option<String>,
) -> Result<Vec<MemoryView>, MnemoError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    // Empty category means "all categories"
    let category = category.filter(|c| !c.is_empty());
    let access_match = ctx.access_match();
    let now = now_timestamp();

    ctx.pool()
        .run(move |conn| {
            recent_memories_sync(conn, limit, category.as_deref(), access_match, &now)
        })
        .await
}

/// Substring search over memory content. Does not touch access tracking.
pub async fn search_memories<C: ToolContext>(
    ctx: &C,
    query: String,
    limit: Option<i64>,
) -> Vec<MemoryView> {
    match try_search_memories(ctx, query, limit).await {
        Ok(memories) => memories,
        Err(e) => {
            error!(error = %e, "Error searching memories");
            Vec::new()
        }
    }
}

/// Fallible form of [`search_memories`]
pub async fn try_search_memories<C: ToolContext>(
    ctx: &C,
    query: String,
    limit: Option<i64>,
) -> Result<Vec<MemoryView>, MnemoError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    ctx.pool()
        .run(move |conn| search_memories_sync(conn, &query, limit))
        .await
}

/// Recent memories rendered as a context block.
///
/// With a non-empty `categories` list, each category is listed in turn (up to
/// `limit_per_category` each) and the results are concatenated in list order.
/// Otherwise the most recent memories across all categories are used.
pub async fn load_memories_to_context<C: ToolContext>(
    ctx: &C,
    categories: Option<Vec<String>>,
    limit_per_category: Option<i64>,
) -> String {
    let limit = limit_per_category.unwrap_or(DEFAULT_LIMIT);

    let memories = match categories.filter(|c| !c.is_empty()) {
        Some(categories) => {
            let mut all = Vec::new();
            for category in categories {
                all.extend(get_recent_memories(ctx, Some(limit), Some(category)).await);
            }
            all
        }
        None => get_recent_memories(ctx, Some(limit), None).await,
    };

    format_memories_for_context(&memories)
}

/// Context block of recent memories across all categories
pub async fn load_all_memories<C: ToolContext>(ctx: &C) -> String {
    load_memories_to_context(ctx, None, None).await
}

/// Context block of recent memories in one category
pub async fn load_category_memories<C: ToolContext>(ctx: &C, category: String) -> String {
    load_memories_to_context(ctx, Some(vec![category]), None).await
}
