//! Payments gateway - the seam between handlers and Stripe.
//!
//! [`PaymentsApi`] is the trait handlers depend on; [`StripeGateway`] is
//! the `async-stripe` implementation. One network call per method, awaited,
//! no retry. Every external call is traced at debug level so all Stripe
//! traffic shares the same observability hook.

use async_trait::async_trait;
use serde_json::Value;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems, ListProducts, Product,
    ProductSearchParams,
};
use tracing::debug;

use super::error::PaymentsResult;
use super::types::{CheckoutLineItem, CheckoutSessionRequest, ProductListOptions};

/// Fields expanded inline on listing/search results when the caller asks
/// for the default price.
const DEFAULT_PRICE_EXPAND: &[&str] = &["data.default_price"];

/// Operations this server needs from the payments provider.
///
/// Handlers hold an `Arc<dyn PaymentsApi>` received at construction, so
/// tests can substitute a recording client.
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// Create a payment-mode checkout session. Returns the full session
    /// object as reported by the provider.
    async fn create_checkout_session(&self, request: CheckoutSessionRequest)
    -> PaymentsResult<Value>;

    /// List active products, first page only.
    async fn list_products(&self, options: ProductListOptions) -> PaymentsResult<Vec<Value>>;

    /// Search active products with a search-grammar query, first page only.
    async fn search_products(&self, query: &str, limit: u64) -> PaymentsResult<Vec<Value>>;
}

/// Stripe-backed implementation of [`PaymentsApi`].
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create a gateway from a secret key.
    ///
    /// A missing key is not a construction failure: calls made without one
    /// fail with a Stripe authentication error, per the contract that the
    /// credential is only checked at the first external call.
    pub fn new(secret_key: Option<String>) -> Self {
        Self {
            client: Client::new(secret_key.unwrap_or_default()),
        }
    }
}

/// Map line items 1:1 into the Stripe request shape, preserving order.
fn build_line_items(items: &[CheckoutLineItem]) -> Vec<CreateCheckoutSessionLineItems> {
    items
        .iter()
        .map(|item| CreateCheckoutSessionLineItems {
            price: Some(item.price.clone()),
            quantity: Some(item.quantity),
            ..Default::default()
        })
        .collect()
}

#[async_trait]
impl PaymentsApi for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> PaymentsResult<Value> {
        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Payment);
        params.success_url = Some(&request.success_url);
        params.cancel_url = Some(&request.cancel_url);
        params.line_items = Some(build_line_items(&request.line_items));

        debug!(
            line_items = request.line_items.len(),
            "creating checkout session"
        );
        let session = StripeCheckoutSession::create(&self.client, params).await?;
        debug!(session = %session.id, "checkout session created");

        Ok(serde_json::to_value(session)?)
    }

    async fn list_products(&self, options: ProductListOptions) -> PaymentsResult<Vec<Value>> {
        let mut params = ListProducts::new();
        params.active = Some(true);
        params.limit = options.limit;
        if options.expand_default_price {
            params.expand = DEFAULT_PRICE_EXPAND;
        }

        debug!(limit = ?options.limit, "listing active products");
        let page = Product::list(&self.client, &params).await?;
        debug!(count = page.data.len(), "listed active products");

        page.data
            .into_iter()
            .map(|product| serde_json::to_value(product).map_err(Into::into))
            .collect()
    }

    async fn search_products(&self, query: &str, limit: u64) -> PaymentsResult<Vec<Value>> {
        let params = ProductSearchParams {
            query: query.to_string(),
            limit: Some(limit),
            expand: DEFAULT_PRICE_EXPAND,
            ..Default::default()
        };

        debug!(%query, limit, "searching products");
        let results = Product::search(&self.client, params).await?;
        debug!(count = results.data.len(), "product search finished");

        results
            .data
            .into_iter()
            .map(|product| serde_json::to_value(product).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_items_map_positionally() {
        let items = vec![
            CheckoutLineItem {
                price: "price_1".to_string(),
                quantity: 2,
            },
            CheckoutLineItem {
                price: "price_2".to_string(),
                quantity: 7,
            },
        ];

        let mapped = build_line_items(&items);
        assert_eq!(mapped.len(), items.len());
        for (input, output) in items.iter().zip(&mapped) {
            assert_eq!(output.price.as_deref(), Some(input.price.as_str()));
            assert_eq!(output.quantity, Some(input.quantity));
        }
    }

    #[test]
    fn test_empty_items_forwarded_as_empty() {
        // Empty checkouts are delegated to Stripe, not rejected here
        assert!(build_line_items(&[]).is_empty());
    }
}
