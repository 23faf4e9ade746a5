//! Resources domain module.
//!
//! Resources represent read-only data addressable by URI. This server
//! exposes a single parameterized collection, `products://{product_id}`,
//! enumerated live from the payments provider on each read.
//!
//! ## Architecture
//!
//! - `registry.rs` - Central resource template registration
//! - `service.rs` - Resource service for listing and reading
//! - `error.rs` - Resource-specific error types

mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{PRODUCTS_URI_PREFIX, get_all_resource_templates};
pub use service::ResourceService;
