//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - JSON-RPC dispatch for tool calls over the HTTP transports
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::warn;

use super::definitions::{CreateCheckoutSessionTool, ListProductsTool};
use crate::payments::PaymentsApi;

/// Tool registry - manages all available tools.
///
/// Holds the payments gateway handed to it at construction and dispatches
/// HTTP tool calls to the matching definition.
pub struct ToolRegistry {
    payments: Arc<dyn PaymentsApi>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(payments: Arc<dyn PaymentsApi>) -> Self {
        Self { payments }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![CreateCheckoutSessionTool::NAME, ListProductsTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Single source of truth for tool metadata; both the rmcp and HTTP
    /// transports list from here.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            CreateCheckoutSessionTool::to_tool(),
            ListProductsTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            CreateCheckoutSessionTool::NAME => {
                CreateCheckoutSessionTool::http_handler(arguments, self.payments.clone()).await
            }
            ListProductsTool::NAME => {
                ListProductsTool::http_handler(arguments, self.payments.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}
