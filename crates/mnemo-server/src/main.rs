// crates/mnemo-server/src/main.rs
// Mnemo - persistent categorized memory store

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, run_init, run_mcp_server, run_tool};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv(); // Load .env from current directory

    let cli = Cli::parse();

    // Set up logging based on command
    let log_level = match &cli.command {
        Some(Commands::Serve) | None => Level::WARN, // Quiet for MCP stdio
        Some(Commands::Tool { .. }) | Some(Commands::Init) => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            run_mcp_server(cli.db_path).await?;
        }
        Some(Commands::Tool { name, args }) => {
            run_tool(name, args, cli.db_path).await?;
        }
        Some(Commands::Init) => {
            run_init(cli.db_path).await?;
        }
    }

    Ok(())
}
