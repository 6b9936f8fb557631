// crates/mnemo-server/src/cli/init.rs
// Database setup command

use anyhow::Result;
use mnemo::config::EnvConfig;
use mnemo::db::count_memories_sync;
use mnemo::db::pool::DatabasePool;
use std::path::PathBuf;
use tracing::warn;

/// Create the database (if missing) and report its location and size
pub async fn run_init(db_path: Option<PathBuf>) -> Result<()> {
    let env_config = EnvConfig::load();
    for warning in &env_config.validate().warnings {
        warn!("{}", warning);
    }

    let store = env_config.store_config(db_path.as_deref());
    let pool = DatabasePool::open(&store.db_path).await?;
    let count = pool
        .interact(|conn| Ok(count_memories_sync(conn)?))
        .await?;

    println!(
        "Memory database ready at {} ({} memories, access tracking by {})",
        store.db_path.display(),
        count,
        store.access_match.as_str()
    );
    Ok(())
}
