// db/test_support.rs
// Shared test helpers for database tests

use super::pool::DatabasePool;
use std::sync::Arc;

/// Create a test pool (in-memory DB, schema applied)
pub async fn setup_test_pool() -> Arc<DatabasePool> {
    Arc::new(
        DatabasePool::open_in_memory()
            .await
            .expect("Failed to open in-memory pool"),
    )
}
