// crates/mnemo-server/src/cli/serve.rs
// MCP server initialization and main loop

use anyhow::Result;
use mnemo::config::EnvConfig;
use mnemo::db::pool::DatabasePool;
use mnemo::mcp::MnemoServer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolve configuration and build the server around a pooled database.
///
/// A failed schema setup is logged, not returned: the server still starts and
/// each operation reports its own failure.
pub async fn setup_server_context(db_path: Option<PathBuf>) -> Result<MnemoServer> {
    // Load configuration once (single source of truth)
    let env_config = EnvConfig::load();

    // Validate and log warnings
    let validation = env_config.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    let store = env_config.store_config(db_path.as_deref());
    info!(
        path = %store.db_path.display(),
        access_match = store.access_match.as_str(),
        "Using memory database"
    );

    let pool = Arc::new(DatabasePool::build(&store.db_path)?);
    if let Err(e) = pool.initialize().await {
        error!(path = %store.db_path.display(), "Error initializing database: {:#}", e);
    }

    Ok(MnemoServer::new(pool, store.access_match))
}

/// Run the MCP server with stdio transport
pub async fn run_mcp_server(db_path: Option<PathBuf>) -> Result<()> {
    let server = setup_server_context(db_path).await?;

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}
