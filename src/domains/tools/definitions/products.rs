//! Product listing/search tool definition.
//!
//! Two deliberate modes, not a unified query: with no filters present the
//! tool lists active products; with any filter present it builds a search
//! query from the filters and calls the provider's search operation. Both
//! modes return the result data serialized as one text content block.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::common::{default_limit, error_result, success_result, to_mcp_error};
use crate::domains::tools::error::ToolError;
use crate::payments::query::build_search_query;
use crate::payments::{PaymentsApi, ProductListOptions, QueryOperator};

/// Parameters for the product listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListProductsParams {
    /// Product description to match.
    #[schemars(description = "Product description")]
    pub description: Option<String>,

    /// Metadata entries to match, one search clause per key.
    #[schemars(description = "Product metadata")]
    pub metadata: Option<BTreeMap<String, String>>,

    /// Product name to match.
    #[schemars(description = "Product name")]
    pub name: Option<String>,

    /// Combinator between the supplied filters.
    #[serde(default)]
    #[schemars(description = "Operator for AND/OR")]
    pub operator: QueryOperator,

    /// Maximum number of products to return.
    #[serde(default = "default_limit")]
    #[schemars(description = "Limit the number of products to return")]
    pub limit: u64,
}

impl ListProductsParams {
    /// True when no filter is present and the unfiltered listing applies.
    ///
    /// A present-but-empty metadata map counts as a filter; the resulting
    /// empty search query is forwarded and rejected upstream.
    fn is_unfiltered(&self) -> bool {
        self.description.is_none() && self.metadata.is_none() && self.name.is_none()
    }
}

/// Product listing tool - lists or searches active products.
pub struct ListProductsTool;

impl ListProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List active products, or search them by description, \
        name and metadata. Filters combine with AND or OR. Without filters, returns the active \
        product listing with the default price expanded.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &ListProductsParams,
        payments: &dyn PaymentsApi,
    ) -> Result<CallToolResult, ToolError> {
        let fetched = if params.is_unfiltered() {
            info!(limit = params.limit, "listing active products");
            payments
                .list_products(ProductListOptions {
                    limit: Some(params.limit),
                    expand_default_price: true,
                })
                .await
        } else {
            let query = build_search_query(
                params.description.as_deref(),
                params.name.as_deref(),
                params.metadata.as_ref(),
                params.operator,
            );
            info!(%query, limit = params.limit, "searching products");
            payments.search_products(&query, params.limit).await
        };

        match fetched {
            Ok(products) => {
                let text = serde_json::to_string(&products)
                    .map_err(|e| ToolError::internal(e.to_string()))?;
                Ok(success_result(text))
            }
            Err(e) => Ok(error_result(&format!("Product lookup failed: {e}"))),
        }
    }

    /// HTTP handler for this tool (JSON-RPC transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        payments: Arc<dyn PaymentsApi>,
    ) -> Result<serde_json::Value, String> {
        let params: ListProductsParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))?;

        let result = Self::execute(&params, payments.as_ref())
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListProductsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp transport.
    pub fn create_route<S>(payments: Arc<dyn PaymentsApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let payments = payments.clone();
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: ListProductsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::execute(&params, payments.as_ref())
                    .await
                    .map_err(to_mcp_error)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::mock::{MockPayments, RecordedCall};
    use rmcp::model::RawContent;

    fn params(json: &str) -> ListProductsParams {
        serde_json::from_str(json).unwrap()
    }

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_default_limit_is_ten() {
        assert_eq!(params("{}").limit, 10);
    }

    #[tokio::test]
    async fn test_no_filters_takes_unfiltered_branch() {
        let payments = MockPayments::new();
        let result = ListProductsTool::execute(&params("{}"), &payments)
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            payments.calls(),
            vec![RecordedCall::ListProducts(ProductListOptions {
                limit: Some(10),
                expand_default_price: true,
            })]
        );
    }

    #[tokio::test]
    async fn test_operator_and_limit_alone_stay_unfiltered() {
        let payments = MockPayments::new();
        let result =
            ListProductsTool::execute(&params(r#"{"operator": "OR", "limit": 25}"#), &payments)
                .await
                .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            payments.calls(),
            vec![RecordedCall::ListProducts(ProductListOptions {
                limit: Some(25),
                expand_default_price: true,
            })]
        );
    }

    #[tokio::test]
    async fn test_name_filter_takes_search_branch() {
        let payments = MockPayments::new();
        ListProductsTool::execute(&params(r#"{"name": "Widget"}"#), &payments)
            .await
            .unwrap();

        assert_eq!(
            payments.calls(),
            vec![RecordedCall::SearchProducts {
                query: "name:\"Widget\"".to_string(),
                limit: 10,
            }]
        );
    }

    #[tokio::test]
    async fn test_or_combination_query() {
        let payments = MockPayments::new();
        let input = r#"{"name": "Widget", "metadata": {"color": "red"}, "operator": "OR"}"#;
        ListProductsTool::execute(&params(input), &payments)
            .await
            .unwrap();

        assert_eq!(
            payments.calls(),
            vec![RecordedCall::SearchProducts {
                query: "name:\"Widget\" OR metadata[\"color\"]:\"red\"".to_string(),
                limit: 10,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_metadata_map_counts_as_filter() {
        let payments = MockPayments::new();
        ListProductsTool::execute(&params(r#"{"metadata": {}}"#), &payments)
            .await
            .unwrap();

        assert_eq!(
            payments.calls(),
            vec![RecordedCall::SearchProducts {
                query: String::new(),
                limit: 10,
            }]
        );
    }

    #[tokio::test]
    async fn test_repeated_calls_issue_independent_listings() {
        let payments = MockPayments::new();
        let p = params("{}");
        ListProductsTool::execute(&p, &payments).await.unwrap();
        ListProductsTool::execute(&p, &payments).await.unwrap();

        assert_eq!(payments.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_result_serializes_product_data() {
        let payments = MockPayments::new();
        let result = ListProductsTool::execute(&params("{}"), &payments)
            .await
            .unwrap();

        let text = result_text(&result);
        assert!(text.contains("prod_1"));
        assert!(text.contains("prod_2"));
    }

    #[tokio::test]
    async fn test_external_failure_surfaces_as_tool_error_result() {
        let payments = MockPayments::failing();
        let result = ListProductsTool::execute(&params("{}"), &payments)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Product lookup failed"));
    }
}
