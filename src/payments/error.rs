//! Payments error types.

use thiserror::Error;

/// Result type for payments operations.
pub type PaymentsResult<T> = Result<T, PaymentsError>;

/// Errors reported by the payments gateway.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// Error returned by the Stripe API (auth, rate limit, invalid
    /// reference, malformed search query). Propagated unmodified; the
    /// gateway never retries.
    #[error("Stripe error: {0}")]
    Stripe(#[from] stripe::StripeError),

    /// A Stripe response could not be serialized for the protocol layer.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
