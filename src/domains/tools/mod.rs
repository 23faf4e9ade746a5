//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable operations that can be called by MCP clients; here
//! each one validates its input and forwards a single request to the
//! payments gateway.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - rmcp ToolRouter builder
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
