//! Resource Registry - central registration of resource templates.

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};

/// URI scheme prefix addressing individual products.
pub const PRODUCTS_URI_PREFIX: &str = "products://";

/// Get all registered resource templates.
///
/// The products template declares no listable sub-keys; clients read a
/// `products://` URI and receive the enumerated catalog entries.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: "products://{product_id}".to_string(),
            name: "products".to_string(),
            title: Some("Active Products".to_string()),
            description: Some(
                "Active products in the store, one entry per product id".to_string(),
            ),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_contain_products() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "products://{product_id}");
    }
}
