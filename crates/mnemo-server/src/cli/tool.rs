// crates/mnemo-server/src/cli/tool.rs
// Direct tool execution from CLI

use super::serve::setup_server_context;
use anyhow::Result;
use mnemo::mcp::requests::{
    GetRecentMemoriesRequest, LoadCategoryRequest, LoadMemoriesRequest, SearchMemoriesRequest,
    StoreMemoryRequest,
};
use std::path::PathBuf;

/// Execute a tool directly from the command line
pub async fn run_tool(name: String, args: String, db_path: Option<PathBuf>) -> Result<()> {
    let server = setup_server_context(db_path).await?;

    let output = match name.as_str() {
        "store_memory" => {
            let req: StoreMemoryRequest = serde_json::from_str(&args)?;
            let stored = mnemo::tools::store_memory(&server, req.content, req.category).await;
            serde_json::to_string_pretty(&stored)?
        }
        "get_recent_memories" => {
            let req: GetRecentMemoriesRequest = serde_json::from_str(&args)?;
            let memories = mnemo::tools::get_recent_memories(&server, req.limit, req.category).await;
            serde_json::to_string_pretty(&memories)?
        }
        "search_memories" => {
            let req: SearchMemoriesRequest = serde_json::from_str(&args)?;
            let memories = mnemo::tools::search_memories(&server, req.query, req.limit).await;
            serde_json::to_string_pretty(&memories)?
        }
        "load_memories_to_context" => {
            let req: LoadMemoriesRequest = serde_json::from_str(&args)?;
            mnemo::tools::load_memories_to_context(&server, req.categories, req.limit_per_category)
                .await
        }
        "load_all_memories" => mnemo::tools::load_all_memories(&server).await,
        "load_category_memories" => {
            let req: LoadCategoryRequest = serde_json::from_str(&args)?;
            mnemo::tools::load_category_memories(&server, req.category).await
        }
        _ => {
            anyhow::bail!(
                "Unknown tool: {}. Available: {}",
                name,
                list_cli_tool_names().join(", ")
            );
        }
    };

    println!("{}", output);
    Ok(())
}

/// Returns the list of tool names supported by the CLI dispatcher.
fn list_cli_tool_names() -> Vec<&'static str> {
    vec![
        "store_memory",
        "get_recent_memories",
        "search_memories",
        "load_memories_to_context",
        "load_all_memories",
        "load_category_memories",
    ]
}
