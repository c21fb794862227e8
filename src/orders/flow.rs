//! Checkout state machine.
//!
//! Sequences a transferred cart through detail collection, optional
//! payment-pending parking, and final submission to the order log. The
//! durable cart copy is cleared exactly once, at confirmed submission.

use jiff::Timestamp;
use tokio::time::timeout;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{
    cart::Cart,
    checkout::{CheckoutForm, final_total},
    config::{CheckoutConfig, SubmitMode},
    orders::{
        errors::CheckoutError,
        log::OrderLog,
        models::{Order, OrderLine, OrderStatus, payment_reference},
    },
    store::{CartStore, KeyValueStore},
};

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Collecting customer details.
    Form,
    /// A bank-transfer order parked in memory, waiting for the customer
    /// to confirm the transfer. Nothing is persisted yet.
    PaymentPending {
        /// The order as it will be recorded on confirmation.
        order: Order,
        /// The reference the customer quotes with the wire.
        reference: String,
    },
    /// Terminal success.
    Submitted {
        /// Final charged amount in minor units.
        total: u64,
    },
}

/// The checkout state machine for one customer session.
///
/// Owns the in-memory cart (read back from the transfer channel at
/// construction), the details form, and the current flow state. Every
/// transition takes `&mut self`, so a second submission cannot begin
/// while one is in flight.
#[derive(Debug)]
pub struct CheckoutFlow<S, L> {
    config: CheckoutConfig,
    store: CartStore<S>,
    log: L,
    cart: Cart,
    form: CheckoutForm,
    state: FlowState,
}

impl<S, L> CheckoutFlow<S, L>
where
    S: KeyValueStore,
    L: OrderLog,
{
    /// Open the checkout, reading the transferred cart back from the
    /// durable store. An absent or malformed stored cart yields an empty
    /// one, which [`CheckoutFlow::submit_details`] will then refuse.
    pub fn new(config: CheckoutConfig, store: CartStore<S>, log: L) -> Self {
        let cart = store.load();

        Self {
            config,
            store,
            log,
            cart,
            form: CheckoutForm::new(),
            state: FlowState::Form,
        }
    }

    /// The current flow state.
    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// The in-memory cart being checked out.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The details form, for rendering values and field messages.
    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access to the details form.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// The transfer channel this flow was opened over.
    #[must_use]
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// The order log collaborator.
    #[must_use]
    pub fn order_log(&self) -> &L {
        &self.log
    }

    /// The amount that would be charged right now, in minor units.
    #[must_use]
    pub fn final_total(&self) -> u64 {
        final_total(&self.cart, self.form.details(), self.config.delivery_fee)
    }

    /// Submit the details form.
    ///
    /// In [`SubmitMode::Direct`] a valid form is recorded immediately and
    /// the flow lands on [`FlowState::Submitted`]. In
    /// [`SubmitMode::BankTransfer`] the flow parks on
    /// [`FlowState::PaymentPending`] with a freshly minted order id and
    /// payment reference; nothing is persisted until
    /// [`CheckoutFlow::confirm_transfer`]. A fresh id is minted on every
    /// pass through this transition.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::DetailsAlreadySubmitted`] outside the form
    ///   state.
    /// - [`CheckoutError::EmptyCart`] when there is nothing to check out;
    ///   no id is minted and no transition occurs.
    /// - [`CheckoutError::Validation`] when required fields are missing;
    ///   the per-field messages are also recorded on the form.
    /// - [`CheckoutError::Submission`] or
    ///   [`CheckoutError::SubmissionTimeout`] when the direct-mode append
    ///   fails; the flow stays on the form and the cart and its durable
    ///   copy are untouched.
    pub async fn submit_details(&mut self) -> Result<(), CheckoutError> {
        if !matches!(self.state, FlowState::Form) {
            return Err(CheckoutError::DetailsAlreadySubmitted);
        }

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if !self.form.validate() {
            return Err(CheckoutError::Validation(self.form.errors().clone()));
        }

        let order = self.build_order();

        match self.config.submit_mode {
            SubmitMode::Direct => self.append_and_finish(order).await,
            SubmitMode::BankTransfer => {
                let reference = payment_reference(&self.config.reference_prefix, order.order_id);

                debug!(order_id = %order.order_id, %reference, "order awaiting bank transfer");

                self.state = FlowState::PaymentPending { order, reference };

                Ok(())
            }
        }
    }

    /// Return from the payment instructions to the details form.
    ///
    /// The pending order is discarded outright; the cart and its durable
    /// copy are untouched, and a later resubmit mints a different order
    /// id.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoPendingPayment`] when no payment is
    /// pending.
    pub fn go_back(&mut self) -> Result<(), CheckoutError> {
        if !matches!(self.state, FlowState::PaymentPending { .. }) {
            return Err(CheckoutError::NoPendingPayment);
        }

        debug!("pending order discarded, returning to details form");

        self.state = FlowState::Form;

        Ok(())
    }

    /// The customer has confirmed the bank transfer.
    ///
    /// On success the order is recorded with [`OrderStatus::Confirmed`],
    /// the in-memory cart and its durable copy are cleared, and the flow
    /// lands on [`FlowState::Submitted`]. On failure or timeout the flow
    /// rolls back to the details form with the cart preserved for a
    /// retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NoPendingPayment`] when nothing is pending.
    /// - [`CheckoutError::Submission`] or
    ///   [`CheckoutError::SubmissionTimeout`] when the append fails.
    pub async fn confirm_transfer(&mut self) -> Result<(), CheckoutError> {
        let previous = std::mem::replace(&mut self.state, FlowState::Form);

        let FlowState::PaymentPending { mut order, .. } = previous else {
            self.state = previous;
            return Err(CheckoutError::NoPendingPayment);
        };

        order.status = OrderStatus::Confirmed;

        self.append_and_finish(order).await
    }

    /// Start over after a completed order ("return to menu").
    ///
    /// Clears any residual cart state, the durable copy, and the form,
    /// and re-enters the top of the flow with an empty cart.
    pub fn reset(&mut self) {
        self.cart.clear();

        if let Err(err) = self.store.clear() {
            warn!("failed to clear stored cart during reset: {err}");
        }

        self.form = CheckoutForm::new();
        self.state = FlowState::Form;
    }

    fn build_order(&self) -> Order {
        Order {
            order_id: Uuid::now_v7(),
            user_id: self.log.user_id(),
            status: OrderStatus::New,
            placed_at: Timestamp::now(),
            total_items: self.cart.total_items(),
            total_cost: self.final_total(),
            items: self.cart.lines().iter().map(OrderLine::from).collect(),
            customer: self.form.details().clone(),
            source: self.config.source.clone(),
        }
    }

    async fn append_and_finish(&mut self, order: Order) -> Result<(), CheckoutError> {
        let order_id = order.order_id;
        let total = order.total_cost;

        match timeout(self.config.submit_timeout, self.log.append_order(order)).await {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                error!(%order_id, "order log append failed: {source}");
                return Err(CheckoutError::Submission(source));
            }
            Err(_) => {
                error!(%order_id, "order log append timed out");
                return Err(CheckoutError::SubmissionTimeout);
            }
        }

        self.cart.clear();

        if let Err(err) = self.store.clear() {
            warn!("failed to clear stored cart after submission: {err}");
        }

        debug!(%order_id, total, "order submitted");

        self.state = FlowState::Submitted { total };

        Ok(())
    }
}
