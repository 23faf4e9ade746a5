//! Common utilities shared across tool definitions.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use tracing::warn;

use crate::domains::tools::error::ToolError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with a single text content block.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Default limit for product listings and searches.
pub fn default_limit() -> u64 {
    10
}

/// Map a tool error onto the protocol layer's error convention.
///
/// Validation failures surface as invalid-params; anything else is an
/// internal error.
pub fn to_mcp_error(error: ToolError) -> McpError {
    match error {
        ToolError::InvalidArguments(msg) => McpError::invalid_params(msg, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}
