//! Commerce MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing
//! Stripe-backed e-commerce operations: checkout session creation, product
//! listing/search, and a products resource.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server handler, and the
//!   transport layer (streaming SSE + unary JSON-RPC over one HTTP
//!   listener, plus the standard stdio mode)
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: `create_checkout_session` and `list_products`
//!   - **resources**: the `products://{product_id}` collection
//! - **payments**: the `PaymentsApi` seam and its Stripe gateway
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use commerce_mcp_server::core::{Config, McpServer, TransportService};
//! use commerce_mcp_server::payments::StripeGateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let gateway = Arc::new(StripeGateway::new(
//!         config.credentials.stripe_secret_key.clone(),
//!     ));
//!     let server = McpServer::new(config.clone(), gateway);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod payments;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
