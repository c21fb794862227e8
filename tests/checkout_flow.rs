//! End-to-end checkout scenarios.
//!
//! Drives the full path a customer takes: items added on the menu
//! surface, the cart handed across the page boundary through the durable
//! store, and the checkout flow walked to a recorded order.

use testresult::TestResult;

use galette::{
    cart::Cart,
    checkout::{DeliveryMethod, Field},
    config::{CheckoutConfig, SubmitMode},
    orders::{
        CheckoutError, CheckoutFlow, FlowState, MemoryOrderLog, MockOrderLog, OrderLog,
        OrderLogError, OrderStatus, payment_reference,
    },
    products::Product,
    store::{CartStore, MemoryStore},
};

fn scone() -> Product {
    Product::new("a", "Scone", 3_50)
}

/// Menu-surface half of the journey: build the cart and persist it for
/// the checkout surface to pick up.
fn handoff_two_scones() -> TestResult<CartStore<MemoryStore>> {
    let mut cart = Cart::new();
    cart.add_item(&scone());
    cart.add_item(&scone());

    let store = CartStore::new(MemoryStore::new());
    store.save(&cart)?;

    Ok(store)
}

fn bank_transfer_config() -> CheckoutConfig {
    CheckoutConfig {
        submit_mode: SubmitMode::BankTransfer,
        ..CheckoutConfig::default()
    }
}

#[tokio::test]
async fn scenario_a_pickup_order_submits_and_clears_the_store() -> TestResult {
    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(CheckoutConfig::default(), store, MemoryOrderLog::new());

    assert_eq!(flow.cart().total_items(), 2);

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");

    assert_eq!(flow.final_total(), 7_00);

    flow.submit_details().await?;

    assert_eq!(flow.state(), &FlowState::Submitted { total: 7_00 });
    assert!(flow.store().load().is_empty());

    let orders = flow.order_log().orders();

    assert_eq!(orders.len(), 1);

    let Some(order) = orders.first() else {
        panic!("no order recorded");
    };

    assert_eq!(order.total_items, 2);
    assert_eq!(order.total_cost, 7_00);
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.user_id, flow.order_log().user_id());
    assert_eq!(order.source, "Site General Checkout");
    assert_eq!(
        order.items.first().map(|line| line.total_price),
        Some(7_00)
    );

    Ok(())
}

#[tokio::test]
async fn scenario_b_delivery_without_address_is_blocked() -> TestResult {
    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(CheckoutConfig::default(), store, MemoryOrderLog::new());

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");
    flow.form_mut().set_delivery(DeliveryMethod::Delivery);

    assert_eq!(flow.final_total(), 12_00);

    let result = flow.submit_details().await;

    let Err(CheckoutError::Validation(errors)) = result else {
        panic!("expected a validation error, got {result:?}");
    };

    assert_eq!(errors.len(), 1);
    assert!(errors.message(Field::Address).is_some());

    // Blocked submit: no transition, nothing recorded, cart still stored.
    assert_eq!(flow.state(), &FlowState::Form);
    assert!(flow.order_log().orders().is_empty());
    assert_eq!(flow.store().load().total_items(), 2);

    Ok(())
}

#[tokio::test]
async fn scenario_c_empty_cart_is_blocked_before_any_order_exists() {
    let store = CartStore::new(MemoryStore::new());

    let mut flow = CheckoutFlow::new(CheckoutConfig::default(), store, MemoryOrderLog::new());

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");

    let result = flow.submit_details().await;

    assert!(
        matches!(result, Err(CheckoutError::EmptyCart)),
        "expected EmptyCart, got {result:?}"
    );
    assert_eq!(flow.state(), &FlowState::Form);
    assert!(flow.order_log().orders().is_empty());
}

#[tokio::test]
async fn scenario_d_bank_transfer_reference_and_fresh_ids() -> TestResult {
    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(bank_transfer_config(), store, MemoryOrderLog::new());

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");

    flow.submit_details().await?;

    let first_id = match flow.state() {
        FlowState::PaymentPending { order, reference } => {
            assert_eq!(*reference, payment_reference("SITE-ORDER-", order.order_id));
            assert_eq!(
                *reference,
                format!("SITE-ORDER-{}", order.order_id.to_string().to_uppercase())
            );
            order.order_id
        }
        other => panic!("expected PaymentPending, got {other:?}"),
    };

    flow.go_back()?;

    // Going back touches neither the cart nor its durable copy.
    assert_eq!(flow.state(), &FlowState::Form);
    assert_eq!(flow.cart().total_items(), 2);
    assert_eq!(flow.store().load().total_items(), 2);

    flow.submit_details().await?;

    let second_id = match flow.state() {
        FlowState::PaymentPending { order, .. } => order.order_id,
        other => panic!("expected PaymentPending, got {other:?}"),
    };

    assert_ne!(first_id, second_id, "resubmitting must mint a fresh id");

    Ok(())
}

#[tokio::test]
async fn scenario_e_confirmed_transfer_records_and_clears() -> TestResult {
    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(bank_transfer_config(), store, MemoryOrderLog::new());

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");
    flow.form_mut().set_delivery(DeliveryMethod::Delivery);
    flow.form_mut().set_address("12 Batch Lane, Dublin");

    flow.submit_details().await?;

    // Parked: nothing recorded, durable copy intact for recovery.
    assert!(flow.order_log().orders().is_empty());
    assert_eq!(flow.store().load().total_items(), 2);

    flow.confirm_transfer().await?;

    assert_eq!(flow.state(), &FlowState::Submitted { total: 12_00 });
    assert!(flow.cart().is_empty());
    assert!(flow.store().load().is_empty());

    let orders = flow.order_log().orders();
    let Some(order) = orders.first() else {
        panic!("no order recorded");
    };

    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.total_cost, 12_00);

    Ok(())
}

#[tokio::test]
async fn failed_append_is_retryable_without_reentering_details() -> TestResult {
    let mut log = MockOrderLog::new();

    log.expect_user_id().return_const("user-1".to_owned());
    log.expect_append_order()
        .times(1)
        .returning(|_| Err(OrderLogError::Unavailable("connection refused".to_owned())));
    log.expect_append_order().times(1).returning(|_| Ok(()));

    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(bank_transfer_config(), store, log);

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");

    flow.submit_details().await?;

    let result = flow.confirm_transfer().await;

    assert!(
        matches!(result, Err(CheckoutError::Submission(_))),
        "expected Submission, got {result:?}"
    );

    // Rolled back, details intact, cart and durable copy preserved.
    assert_eq!(flow.state(), &FlowState::Form);
    assert_eq!(flow.form().details().name, "Ada Crumb");
    assert_eq!(flow.store().load().total_items(), 2);

    // Second attempt goes through against the recovered collaborator.
    flow.submit_details().await?;
    flow.confirm_transfer().await?;

    assert_eq!(flow.state(), &FlowState::Submitted { total: 7_00 });
    assert!(flow.store().load().is_empty());

    Ok(())
}

#[tokio::test]
async fn reset_after_success_returns_to_an_empty_menu_flow() -> TestResult {
    let store = handoff_two_scones()?;

    let mut flow = CheckoutFlow::new(CheckoutConfig::default(), store, MemoryOrderLog::new());

    flow.form_mut().set_name("Ada Crumb");
    flow.form_mut().set_contact("ada@example.com");

    flow.submit_details().await?;

    flow.reset();

    assert_eq!(flow.state(), &FlowState::Form);
    assert!(flow.cart().is_empty());
    assert!(flow.store().load().is_empty());

    let result = flow.submit_details().await;

    assert!(
        matches!(result, Err(CheckoutError::EmptyCart)),
        "a reset flow starts from an empty cart, got {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn checkout_opened_without_a_handoff_sees_an_empty_cart() {
    // Direct link to checkout: nothing was ever stored.
    let flow = CheckoutFlow::new(
        CheckoutConfig::default(),
        CartStore::new(MemoryStore::new()),
        MemoryOrderLog::new(),
    );

    assert!(flow.cart().is_empty());
    assert_eq!(flow.final_total(), 0);
}
