// crates/mnemo-server/src/tools/core/test_utils.rs
// Shared test utilities for tool tests

use crate::db::pool::DatabasePool;
use crate::db::test_support::setup_test_pool;
use crate::tools::core::ToolContext;
use mnemo_types::AccessMatch;
use std::sync::Arc;

// ============================================================================
// MockToolContext
// ============================================================================

pub struct MockToolContext {
    pub pool: Arc<DatabasePool>,
    access_match: AccessMatch,
}

impl MockToolContext {
    pub async fn new() -> Self {
        Self::with_access_match(AccessMatch::Content).await
    }

    pub async fn with_access_match(access_match: AccessMatch) -> Self {
        Self {
            pool: setup_test_pool().await,
            access_match,
        }
    }
}

impl ToolContext for MockToolContext {
    fn pool(&self) -> &Arc<DatabasePool> {
        &self.pool
    }

    fn access_match(&self) -> AccessMatch {
        self.access_match
    }
}
