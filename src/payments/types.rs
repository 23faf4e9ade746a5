//! Request types passed from handlers to the payments gateway.
//!
//! These are transient, request-scoped values; nothing here outlives the
//! call that created it.

use serde::{Deserialize, Serialize};

/// A validated checkout session request, ready to forward to Stripe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Line items in input order. May be empty; Stripe rejects empty
    /// sessions, this layer does not.
    pub line_items: Vec<CheckoutLineItem>,

    /// URL the customer is redirected to after a completed payment.
    pub success_url: String,

    /// URL the customer is redirected to when checkout is cancelled.
    pub cancel_url: String,
}

/// A (price reference, quantity) pair within a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// Stripe price identifier.
    pub price: String,

    /// Quantity of the item, at least 1.
    pub quantity: u64,
}

/// Options for an active-product listing call.
///
/// Only the first page is fetched; continuation tokens are not followed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListOptions {
    /// Page size bound. `None` uses Stripe's default page size.
    pub limit: Option<u64>,

    /// Expand `data.default_price` inline on each product.
    pub expand_default_price: bool,
}
