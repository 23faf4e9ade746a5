//! Checkout session tool definition.
//!
//! Validates the requested line items and redirect URLs, then forwards a
//! payment-mode checkout session request to the payments gateway. The full
//! session object returned by the provider is serialized back as a single
//! text content block.

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
use url::Url;

use super::common::{error_result, success_result, to_mcp_error};
use crate::domains::tools::error::ToolError;
use crate::payments::{CheckoutLineItem, CheckoutSessionRequest, PaymentsApi};

fn default_success_url() -> String {
    "https://example.com/success".to_string()
}

fn default_cancel_url() -> String {
    "https://example.com/cancel".to_string()
}

/// One requested line item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckoutItemParam {
    /// Stripe price identifier for the item.
    #[schemars(description = "Stripe price identifier for the item")]
    pub price_id: String,

    /// Quantity to purchase.
    #[schemars(description = "Quantity to purchase, at least 1", range(min = 1))]
    pub quantity: u64,
}

/// Parameters for the checkout session tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateCheckoutSessionParams {
    /// Items to purchase, in order.
    #[schemars(description = "Line items to include in the session")]
    pub items: Vec<CheckoutItemParam>,

    /// Redirect target after a completed payment.
    #[serde(rename = "successUrl", default = "default_success_url")]
    #[schemars(description = "URL the customer is redirected to after payment")]
    pub success_url: String,

    /// Redirect target after a cancelled checkout.
    #[serde(rename = "cancelUrl", default = "default_cancel_url")]
    #[schemars(description = "URL the customer is redirected to on cancel")]
    pub cancel_url: String,
}

/// Checkout session tool - creates a Stripe-hosted payment session.
pub struct CreateCheckoutSessionTool;

impl CreateCheckoutSessionTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_checkout_session";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a payment-mode checkout session for the given \
        line items. Each item is a Stripe price id plus a quantity. Returns the full checkout \
        session object, including the hosted payment page URL.";

    /// Validate parameters into a gateway request.
    ///
    /// Rejections here never reach the external API. An empty items list is
    /// deliberately allowed through; the provider reports it.
    fn validate(params: &CreateCheckoutSessionParams) -> Result<CheckoutSessionRequest, ToolError> {
        let mut line_items = Vec::with_capacity(params.items.len());
        for item in &params.items {
            if item.price_id.is_empty() {
                return Err(ToolError::invalid_arguments("price_id must not be empty"));
            }
            if item.quantity == 0 {
                return Err(ToolError::invalid_arguments("quantity must be at least 1"));
            }
            line_items.push(CheckoutLineItem {
                price: item.price_id.clone(),
                quantity: item.quantity,
            });
        }

        for (field, value) in [
            ("successUrl", &params.success_url),
            ("cancelUrl", &params.cancel_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ToolError::invalid_arguments(format!(
                    "{field} is not a valid URL: {value}"
                )));
            }
        }

        Ok(CheckoutSessionRequest {
            line_items,
            success_url: params.success_url.clone(),
            cancel_url: params.cancel_url.clone(),
        })
    }

    /// Execute the tool logic.
    pub async fn execute(
        params: &CreateCheckoutSessionParams,
        payments: &dyn PaymentsApi,
    ) -> Result<CallToolResult, ToolError> {
        let request = Self::validate(params)?;
        info!(items = request.line_items.len(), "creating checkout session");

        match payments.create_checkout_session(request).await {
            Ok(session) => {
                let text = serde_json::to_string(&session)
                    .map_err(|e| ToolError::internal(e.to_string()))?;
                Ok(success_result(text))
            }
            Err(e) => Ok(error_result(&format!(
                "Checkout session creation failed: {e}"
            ))),
        }
    }

    /// HTTP handler for this tool (JSON-RPC transport).
    pub async fn http_handler(
        arguments: serde_json::Value,
        payments: Arc<dyn PaymentsApi>,
    ) -> Result<serde_json::Value, String> {
        let params: CreateCheckoutSessionParams =
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
            input_schema: cached_schema_for_type::<CreateCheckoutSessionParams>(),
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
                let params: CreateCheckoutSessionParams =
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

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_redirect_urls_default_when_absent() {
        let json = r#"{"items": [{"price_id": "price_1", "quantity": 2}]}"#;
        let params: CreateCheckoutSessionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.success_url, "https://example.com/success");
        assert_eq!(params.cancel_url, "https://example.com/cancel");
    }

    #[test]
    fn test_non_integer_quantity_rejected_by_schema() {
        let json = r#"{"items": [{"price_id": "price_1", "quantity": 2.5}]}"#;
        assert!(serde_json::from_str::<CreateCheckoutSessionParams>(json).is_err());
    }

    #[test]
    fn test_negative_quantity_rejected_by_schema() {
        let json = r#"{"items": [{"price_id": "price_1", "quantity": -1}]}"#;
        assert!(serde_json::from_str::<CreateCheckoutSessionParams>(json).is_err());
    }

    #[tokio::test]
    async fn test_line_items_forwarded_positionally() {
        let payments = MockPayments::new();
        let json = r#"{"items": [
            {"price_id": "price_1", "quantity": 2},
            {"price_id": "price_2", "quantity": 1}
        ]}"#;
        let params: CreateCheckoutSessionParams = serde_json::from_str(json).unwrap();

        let result = CreateCheckoutSessionTool::execute(&params, &payments)
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert!(result_text(&result).contains("cs_test_1"));

        match &payments.calls()[..] {
            [RecordedCall::CreateCheckoutSession(record)] => {
                assert_eq!(
                    record.line_items,
                    vec![("price_1".to_string(), 2), ("price_2".to_string(), 1)]
                );
                assert_eq!(record.success_url, "https://example.com/success");
                assert_eq!(record.cancel_url, "https://example.com/cancel");
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected_before_external_call() {
        let payments = MockPayments::new();
        let json = r#"{"items": [{"price_id": "price_1", "quantity": 0}]}"#;
        let params: CreateCheckoutSessionParams = serde_json::from_str(json).unwrap();

        let result = CreateCheckoutSessionTool::execute(&params, &payments).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert!(payments.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_url_rejected_before_external_call() {
        let payments = MockPayments::new();
        let json = r#"{
            "items": [{"price_id": "price_1", "quantity": 1}],
            "successUrl": "not a url"
        }"#;
        let params: CreateCheckoutSessionParams = serde_json::from_str(json).unwrap();

        let result = CreateCheckoutSessionTool::execute(&params, &payments).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
        assert!(payments.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_items_delegated_to_provider() {
        let payments = MockPayments::new();
        let params: CreateCheckoutSessionParams =
            serde_json::from_str(r#"{"items": []}"#).unwrap();

        let result = CreateCheckoutSessionTool::execute(&params, &payments)
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(payments.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_external_failure_surfaces_as_tool_error_result() {
        let payments = MockPayments::failing();
        let json = r#"{"items": [{"price_id": "price_1", "quantity": 1}]}"#;
        let params: CreateCheckoutSessionParams = serde_json::from_str(json).unwrap();

        let result = CreateCheckoutSessionTool::execute(&params, &payments)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Checkout session creation failed"));
    }
}
