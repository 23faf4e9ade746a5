//! HTTP transport implementation.
//!
//! One listener serves both protocol bindings of the same server value.
//! Every request goes through a single classification step
//! ([`Endpoint::classify`]) and is delegated to the streaming SSE binding,
//! the unary JSON-RPC binding, or answered with an empty 404.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use super::config::HttpConfig;
use super::error::{TransportError, TransportResult};
use super::router::Endpoint;
use super::rpc::{self, JsonRpcRequest, JsonRpcResponse};
use super::sse::{self, SseSessionRegistry};
use crate::core::McpServer;

/// Upper bound on accepted request bodies.
pub(super) const MAX_BODY_BYTES: usize = 1024 * 1024;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance, shared by both bindings.
    pub(super) server: McpServer,

    /// Live streaming sessions.
    pub(super) sessions: Arc<SseSessionRegistry>,

    /// Endpoint paths and CORS settings.
    pub(super) config: Arc<HttpConfig>,
}

impl AppState {
    pub fn new(server: McpServer, config: HttpConfig) -> Self {
        Self {
            server,
            sessions: Arc::new(SseSessionRegistry::new()),
            config: Arc::new(config),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let state = AppState::new(server, self.config.clone());
        let app = build_router(state, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (streaming {}, unary {}, CORS {})",
            addr, self.config.sse_path, self.config.rpc_path, cors_status
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router: one fallback handler performing the endpoint
/// classification, plus CORS when enabled.
pub(super) fn build_router(state: AppState, config: &HttpConfig) -> Router {
    let mut app = Router::new().fallback(dispatch).with_state(state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Classify the request path and delegate to the matching binding.
async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    match Endpoint::classify(request.uri().path(), &state.config) {
        Endpoint::Streaming => sse::handle(state, request).await,
        Endpoint::Unary => handle_unary(state, request).await,
        Endpoint::NotFound => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Handle a unary JSON-RPC request.
async fn handle_unary(state: AppState, request: Request) -> Response {
    if request.method() != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let bytes = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let rpc_request: JsonRpcRequest = match serde_json::from_slice(&bytes) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed JSON-RPC request: {}", e);
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::parse_error(e.to_string())),
            )
                .into_response();
        }
    };

    let response = rpc::process_request(&state.server, rpc_request).await;
    (StatusCode::OK, Json(response)).into_response()
}
