//! JSON-RPC types and method dispatch shared by both HTTP bindings.
//!
//! The unary endpoint returns the response in the HTTP body; the streaming
//! endpoint pushes it onto the session's event channel. Both go through
//! [`process_request`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::McpServer;

/// MCP protocol version reported to clients.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error (malformed request body).
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, -32700, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Process a JSON-RPC request and return the response.
pub async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    info!("Processing JSON-RPC request: {}", request.method);

    match request.method.as_str() {
        "initialize" => handle_initialize(server, request),

        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),

        "tools/list" => JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "tools": server.list_tools() }),
        ),

        "tools/call" => handle_tools_call(server, request).await,

        "resources/list" => JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "resources": server.list_resources().await }),
        ),

        "resources/templates/list" => JsonRpcResponse::success(
            request.id,
            serde_json::json!({ "resourceTemplates": server.list_resource_templates().await }),
        ),

        "resources/read" => handle_resources_read(server, request).await,

        // Notifications carry no response payload
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            JsonRpcResponse::success(request.id, serde_json::json!(null))
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        }
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

/// Handle resources/read request.
async fn handle_resources_read(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let uri = match params.get("uri").and_then(|v| v.as_str()) {
        Some(u) => u.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing resource URI"),
    };

    match server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::payments::mock::MockPayments;
    use std::sync::Arc;

    fn test_server() -> McpServer {
        McpServer::new(Config::default(), Arc::new(MockPayments::new()))
    }

    fn rpc(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(serde_json::json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_reports_server_info() {
        let response = process_request(&test_server(), rpc("initialize", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "commerce-mcp-server");
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version_rejected() {
        let request = JsonRpcRequest {
            jsonrpc: "1.0".to_string(),
            id: None,
            method: "tools/list".to_string(),
            params: None,
        };
        let response = process_request(&test_server(), request).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_tools_list_contains_both_tools() {
        let response = process_request(&test_server(), rpc("tools/list", None)).await;
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 2);
    }

    #[tokio::test]
    async fn test_tools_call_dispatches() {
        let params = serde_json::json!({"name": "list_products", "arguments": {}});
        let response = process_request(&test_server(), rpc("tools/call", Some(params))).await;
        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["isError"], false);
    }

    #[tokio::test]
    async fn test_tools_call_missing_name_is_invalid_params() {
        let response =
            process_request(&test_server(), rpc("tools/call", Some(serde_json::json!({})))).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_resources_read_returns_contents() {
        let params = serde_json::json!({"uri": "products://prod_1"});
        let response = process_request(&test_server(), rpc("resources/read", Some(params))).await;
        let contents = response.result.unwrap()["contents"].as_array().unwrap().len();
        assert_eq!(contents, 2);
    }

    #[tokio::test]
    async fn test_unknown_method_not_found() {
        let response = process_request(&test_server(), rpc("prompts/list", None)).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
