//! Transport layer for the MCP server.
//!
//! Two transports are available at runtime:
//! - **HTTP** (default): one listener serving the streaming SSE binding
//!   and the unary JSON-RPC binding of the same server, dispatched by
//!   request path
//! - **STDIO**: standard MCP mode via rmcp, selected with
//!   `MCP_TRANSPORT=stdio`
//!
//! Each transport handles the connection lifecycle and delegates message
//! processing to the MCP server handler.

mod config;
mod error;
pub mod http;
pub mod router;
pub mod rpc;
mod service;
pub mod sse;
pub mod stdio;

pub use config::{HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use router::Endpoint;
pub use service::TransportService;
