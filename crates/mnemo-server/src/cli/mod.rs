// crates/mnemo-server/src/cli/mod.rs
// CLI module for Mnemo commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod init;
pub mod serve;
pub mod tool;

// Re-export command handlers
pub use init::run_init;
pub use serve::run_mcp_server;
pub use tool::run_tool;

#[derive(Parser)]
#[command(name = "mnemo")]
#[command(about = "Persistent categorized memory store for AI assistants")]
#[command(version)]
pub struct Cli {
    /// Database file (falls back to memory.db next to the executable if it does not exist)
    #[arg(long, global = true, env = "MEMORY_DB_PATH")]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server over stdio (default)
    Serve,

    /// Execute a tool directly
    Tool {
        /// Tool name (e.g. store_memory, search_memories)
        #[arg(index = 1)]
        name: String,

        /// JSON arguments (e.g. '{"query": "foo"}')
        #[arg(index = 2, default_value = "{}")]
        args: String,
    },

    /// Create the database if needed and print where it lives
    Init,
}
