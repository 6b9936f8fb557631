// crates/mnemo-server/src/mcp/mod.rs
// MCP Server implementation

mod handler;
pub mod requests;
mod resources;
pub mod responses;

pub use requests::{
    GetRecentMemoriesRequest, LoadCategoryRequest, LoadMemoriesRequest, SearchMemoriesRequest,
    StoreMemoryRequest,
};

use crate::db::pool::DatabasePool;
use crate::tools::{self, ToolContext};
use mnemo_types::AccessMatch;
use responses::{json_response, text_response};
use rmcp::{
    ErrorData,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::CallToolResult,
    tool, tool_router,
};
use std::sync::Arc;

/// MCP Server state
#[derive(Clone)]
pub struct MnemoServer {
    pub pool: Arc<DatabasePool>,
    pub access_match: AccessMatch,
    tool_router: ToolRouter<Self>,
}

impl MnemoServer {
    pub fn new(pool: Arc<DatabasePool>, access_match: AccessMatch) -> Self {
        Self {
            pool,
            access_match,
            tool_router: Self::tool_router(),
        }
    }

    /// Names of every tool registered on the router
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

impl ToolContext for MnemoServer {
    fn pool(&self) -> &Arc<DatabasePool> {
        &self.pool
    }

    fn access_match(&self) -> AccessMatch {
        self.access_match
    }
}

#[tool_router]
impl MnemoServer {
    #[tool(description = "Store a new memory. Returns true on success, false on failure.")]
    async fn store_memory(
        &self,
        Parameters(req): Parameters<StoreMemoryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let stored = tools::store_memory(self, req.content, req.category).await;
        Ok(json_response(&stored))
    }

    #[tool(
        description = "Get the most recently stored memories, optionally filtered by category. Marks returned memories as accessed."
    )]
    async fn get_recent_memories(
        &self,
        Parameters(req): Parameters<GetRecentMemoriesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let memories = tools::get_recent_memories(self, req.limit, req.category).await;
        Ok(json_response(&memories))
    }

    #[tool(description = "Search memory content for a substring (case-insensitive for ASCII).")]
    async fn search_memories(
        &self,
        Parameters(req): Parameters<SearchMemoriesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let memories = tools::search_memories(self, req.query, req.limit).await;
        Ok(json_response(&memories))
    }

    #[tool(
        description = "Load recent memories as a formatted context block, per category in the given order or across all categories."
    )]
    async fn load_memories_to_context(
        &self,
        Parameters(req): Parameters<LoadMemoriesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let text =
            tools::load_memories_to_context(self, req.categories, req.limit_per_category).await;
        Ok(text_response(text))
    }
}
