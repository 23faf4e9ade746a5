//! Streaming SSE binding.
//!
//! `GET` on the SSE path opens a session: the client receives an
//! `endpoint` event naming the message sub-path with its `sessionId`,
//! then a `message` event per JSON-RPC response. `POST` on the message
//! sub-path feeds a JSON-RPC request into the session; the HTTP response
//! is 202 once the message is accepted. Session lifecycle beyond this
//! channel plumbing is owned by the client connection itself.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, stream};
use serde::Deserialize;
use tokio::sync::{RwLock, mpsc};
use tracing::{info, warn};
use uuid::Uuid;

use super::http::{AppState, MAX_BODY_BYTES};
use super::rpc::{self, JsonRpcRequest};

/// Buffered events per session before a slow client blocks its sender.
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Live streaming sessions, keyed by session id.
pub struct SseSessionRegistry {
    sessions: RwLock<HashMap<String, mpsc::Sender<Event>>>,
}

impl SseSessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    async fn insert(&self, id: String, tx: mpsc::Sender<Event>) {
        self.sessions.write().await.insert(id, tx);
    }

    async fn remove(&self, id: &str) {
        self.sessions.write().await.remove(id);
    }

    /// Push an event onto a session's channel. Returns false for unknown
    /// sessions and for sessions whose client has disconnected; the
    /// latter are dropped from the registry.
    pub async fn send(&self, id: &str, event: Event) -> bool {
        let tx = self.sessions.read().await.get(id).cloned();
        match tx {
            Some(tx) => {
                if tx.send(event).await.is_ok() {
                    true
                } else {
                    info!(session_id = %id, "streaming session disconnected");
                    self.remove(id).await;
                    false
                }
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SseSessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Query string of a message post.
#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: String,
}

/// Handle a request classified as streaming.
pub(super) async fn handle(state: AppState, request: Request) -> Response {
    if request.uri().path() == state.config.sse_path {
        if request.method() != Method::GET {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }
        connect(&state).await
    } else {
        if request.method() != Method::POST {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }
        message(&state, request).await
    }
}

/// Open a streaming session.
async fn connect(state: &AppState) -> Response {
    let session_id = Uuid::new_v4().to_string();
    let (tx, rx) = mpsc::channel::<Event>(SESSION_CHANNEL_CAPACITY);
    state.sessions.insert(session_id.clone(), tx).await;
    info!(%session_id, "streaming session opened");

    let endpoint = format!("{}?sessionId={}", state.config.message_path(), session_id);
    let handshake = Event::default().event("endpoint").data(endpoint);

    let events = stream::once(async move { Ok::<_, Infallible>(handshake) }).chain(stream::unfold(
        rx,
        |mut rx| async move { rx.recv().await.map(|event| (Ok(event), rx)) },
    ));

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Feed a JSON-RPC message into an open session.
async fn message(state: &AppState, request: Request) -> Response {
    let query = request.uri().query().unwrap_or_default().to_string();
    let session_id = match serde_urlencoded::from_str::<MessageQuery>(&query) {
        Ok(q) => q.session_id,
        Err(_) => return (StatusCode::BAD_REQUEST, "missing sessionId").into_response(),
    };

    let bytes = match axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let rpc_request: JsonRpcRequest = match serde_json::from_slice(&bytes) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed streaming message: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let response = rpc::process_request(&state.server, rpc_request).await;
    let data = match serde_json::to_string(&response) {
        Ok(data) => data,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    let event = Event::default().event("message").data(data);
    if state.sessions.send(&session_id, event).await {
        StatusCode::ACCEPTED.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
