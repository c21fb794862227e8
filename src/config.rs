//! Checkout configuration
//!
//! The values the storefront surfaces previously read from page-injected
//! globals, gathered into an explicit object handed to the flow at
//! construction time.

use std::time::Duration;

/// How an order is finalized once the details form passes validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitMode {
    /// Single-phase: a valid form is recorded immediately.
    #[default]
    Direct,
    /// Two-phase: a valid form parks the order as payment-pending until
    /// the customer confirms their bank transfer.
    BankTransfer,
}

/// Checkout behaviour, with site defaults for every field.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Surcharge in minor units applied to delivery orders.
    ///
    /// Fixed per order; never derived from distance or weight. Defaults
    /// to 500 (5.00 in the site currency).
    pub delivery_fee: u64,

    /// Prefix of the human-presentable payment reference quoted with bank
    /// transfers. Defaults to `"SITE-ORDER-"`.
    pub reference_prefix: String,

    /// Tag recorded on every order naming the surface it came from.
    /// Defaults to `"Site General Checkout"`.
    pub source: String,

    /// Submission strategy. Defaults to [`SubmitMode::Direct`].
    pub submit_mode: SubmitMode,

    /// Upper bound on the order-log append; past it the submission is
    /// treated as failed and the flow returns to the form. Defaults to
    /// 15 seconds.
    pub submit_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_fee: 5_00,
            reference_prefix: "SITE-ORDER-".to_owned(),
            source: "Site General Checkout".to_owned(),
            submit_mode: SubmitMode::default(),
            submit_timeout: Duration::from_secs(15),
        }
    }
}
