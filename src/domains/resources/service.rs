//! Resource service implementation.
//!
//! The products resource enumerates the active catalog fresh on every read:
//! each `products://` read issues one listing call (no expansion, no
//! explicit limit) and maps every product to a text entry keyed by its id.
//! Only the provider's first page is returned; continuation tokens are not
//! followed.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::info;

use super::error::ResourceError;
use super::registry::{PRODUCTS_URI_PREFIX, get_all_resource_templates};
use crate::payments::{PaymentsApi, ProductListOptions};

/// Service for managing and accessing resources.
pub struct ResourceService {
    payments: Arc<dyn PaymentsApi>,
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    /// Create a new ResourceService backed by the given gateway.
    pub fn new(payments: Arc<dyn PaymentsApi>) -> Self {
        info!("Initializing ResourceService");
        Self {
            payments,
            templates: get_all_resource_templates(),
        }
    }

    /// List all static resources. The catalog is addressed through the
    /// template only, so this is always empty.
    pub async fn list_resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    ///
    /// Any `products://` URI resolves to the full active-product
    /// enumeration; other schemes are not found.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        if !uri.starts_with(PRODUCTS_URI_PREFIX) {
            return Err(ResourceError::not_found(uri));
        }

        let products = self
            .payments
            .list_products(ProductListOptions::default())
            .await?;

        let contents = products
            .iter()
            .map(|product| {
                let id = product
                    .get("id")
                    .and_then(|id| id.as_str())
                    .ok_or_else(|| ResourceError::internal("product without id"))?;
                let text = serde_json::to_string(product)
                    .map_err(|e| ResourceError::internal(e.to_string()))?;
                Ok(ResourceContents::text(
                    text,
                    format!("{PRODUCTS_URI_PREFIX}{id}"),
                ))
            })
            .collect::<Result<Vec<_>, ResourceError>>()?;

        Ok(ReadResourceResult { contents })
    }
}
