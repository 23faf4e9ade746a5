//! Recording [`PaymentsApi`] substitute for handler and transport tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::error::{PaymentsError, PaymentsResult};
use super::gateway::PaymentsApi;
use super::types::{CheckoutSessionRequest, ProductListOptions};

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedCall {
    CreateCheckoutSession(CheckoutSessionRequestRecord),
    ListProducts(ProductListOptions),
    SearchProducts { query: String, limit: u64 },
}

/// Comparable snapshot of a checkout request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckoutSessionRequestRecord {
    pub line_items: Vec<(String, u64)>,
    pub success_url: String,
    pub cancel_url: String,
}

pub(crate) struct MockPayments {
    calls: Mutex<Vec<RecordedCall>>,
    fail: bool,
    products: Vec<Value>,
    session: Value,
}

impl MockPayments {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
            products: vec![
                json!({"id": "prod_1", "name": "Widget", "active": true}),
                json!({"id": "prod_2", "name": "Gadget", "active": true}),
            ],
            session: json!({"id": "cs_test_1", "url": "https://checkout.stripe.com/pay/cs_test_1"}),
        }
    }

    /// A mock whose every call fails like an external API error.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub(crate) fn with_products(products: Vec<Value>) -> Self {
        Self {
            products,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self) -> PaymentsResult<()> {
        if self.fail {
            Err(PaymentsError::Stripe(stripe::StripeError::ClientError(
                "simulated upstream failure".to_string(),
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PaymentsApi for MockPayments {
    async fn create_checkout_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> PaymentsResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::CreateCheckoutSession(
                CheckoutSessionRequestRecord {
                    line_items: request
                        .line_items
                        .iter()
                        .map(|item| (item.price.clone(), item.quantity))
                        .collect(),
                    success_url: request.success_url.clone(),
                    cancel_url: request.cancel_url.clone(),
                },
            ));
        self.check_failure()?;
        Ok(self.session.clone())
    }

    async fn list_products(&self, options: ProductListOptions) -> PaymentsResult<Vec<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::ListProducts(options));
        self.check_failure()?;
        Ok(self.products.clone())
    }

    async fn search_products(&self, query: &str, limit: u64) -> PaymentsResult<Vec<Value>> {
        self.calls.lock().unwrap().push(RecordedCall::SearchProducts {
            query: query.to_string(),
            limit,
        });
        self.check_failure()?;
        Ok(self.products.clone())
    }
}
