// crates/mnemo-server/src/mcp/requests.rs
// MCP tool request types

use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StoreMemoryRequest {
    #[schemars(description = "Text to remember")]
    pub content: String,
    #[schemars(description = "Category label (default: general)")]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetRecentMemoriesRequest {
    #[schemars(description = "Maximum number of memories to return (default: 5)")]
    pub limit: Option<i64>,
    #[schemars(description = "Only return memories in this category")]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchMemoriesRequest {
    #[schemars(description = "Substring to look for in memory content")]
    pub query: String,
    #[schemars(description = "Maximum number of matches (default: 5)")]
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LoadMemoriesRequest {
    #[schemars(description = "Categories to load, in order. Omit for all categories")]
    pub categories: Option<Vec<String>>,
    #[schemars(description = "Maximum memories per category (default: 5)")]
    pub limit_per_category: Option<i64>,
}

/// CLI-only: mirrors the `memory://category/{category}` resource
#[derive(Debug, Deserialize)]
pub struct LoadCategoryRequest {
    pub category: String,
}
