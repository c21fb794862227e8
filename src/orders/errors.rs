//! Checkout flow errors.

use thiserror::Error;

use crate::{checkout::ValidationErrors, orders::log::OrderLogError};

/// Errors surfaced by the checkout state machine.
///
/// Every variant is recoverable: each maps to a banner or inline message
/// with a correction or retry path, never a dead end.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with zero items.
    #[error("cart is empty; add items before checking out")]
    EmptyCart,

    /// Required fields are missing; the per-field messages are attached.
    #[error("please fill out all required fields")]
    Validation(ValidationErrors),

    /// The details form was submitted while an order was already past it.
    #[error("order details have already been submitted")]
    DetailsAlreadySubmitted,

    /// A transfer was confirmed, or abandoned, with no payment pending.
    #[error("no payment is awaiting confirmation")]
    NoPendingPayment,

    /// The order log failed to record the order. The cart is preserved,
    /// so the customer can retry without re-entering details.
    #[error("failed to submit order")]
    Submission(#[source] OrderLogError),

    /// The order log did not answer within the configured bound.
    #[error("order submission timed out")]
    SubmissionTimeout,
}
