//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services. Both tools and the
//! products resource template are bound here, once, at construction; the
//! HTTP transports and the rmcp stdio transport are views of the same
//! value.
//!
//! The payments gateway is an explicit constructor dependency captured by
//! the tool routes and the resource service, never a process global.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::resources::{ResourceError, ResourceService};
use crate::domains::tools::{ToolRegistry, build_tool_router};
use crate::payments::PaymentsApi;

/// The main MCP server handler.
///
/// Implements the `ServerHandler` trait from rmcp and coordinates between
/// domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Payments gateway shared by all handlers.
    payments: Arc<dyn PaymentsApi>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration and gateway.
    pub fn new(config: Config, payments: Arc<dyn PaymentsApi>) -> Self {
        let config = Arc::new(config);
        let resource_service = Arc::new(ResourceService::new(payments.clone()));

        Self {
            tool_router: build_tool_router::<Self>(payments.clone()),
            config,
            payments,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for the HTTP transports).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for the HTTP transports).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let registry = ToolRegistry::new(self.payments.clone());
        registry.call_tool(name, arguments).await
    }

    /// List all available resources (for the HTTP transports).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for the HTTP transports).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for the HTTP transports).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Stripe-backed e-commerce MCP server. Provides checkout session creation, \
                 product listing and search tools, and a products resource."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                other => McpError::internal_error(other.to_string(), None),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::mock::MockPayments;

    fn test_server() -> McpServer {
        McpServer::new(Config::default(), Arc::new(MockPayments::new()))
    }

    #[test]
    fn test_server_identity() {
        let server = test_server();
        assert_eq!(server.name(), "commerce-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools_exposes_both_tools() {
        let tools = test_server().list_tools();
        let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(tools.len(), 2);
        assert!(names.contains(&"create_checkout_session"));
        assert!(names.contains(&"list_products"));
    }

    #[tokio::test]
    async fn test_call_tool_through_server() {
        let server = test_server();
        let result = server
            .call_tool("list_products", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(result["isError"], false);
    }

    #[tokio::test]
    async fn test_read_resource_through_server() {
        let server = test_server();
        let result = server.read_resource("products://prod_1").await.unwrap();
        assert_eq!(result["contents"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_resource_templates_shape() {
        let templates = test_server().list_resource_templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0]["uriTemplate"], "products://{product_id}");
    }
}
