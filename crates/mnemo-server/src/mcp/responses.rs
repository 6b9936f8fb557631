// crates/mnemo-server/src/mcp/responses.rs
// Helpers for building tool results

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Serialize a value as the tool's single text content
pub fn json_response<T: Serialize>(value: &T) -> CallToolResult {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize tool result");
        "null".to_string()
    });
    CallToolResult::success(vec![Content::text(json)])
}

/// Plain text tool result
pub fn text_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
