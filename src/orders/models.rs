//! Order models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{cart::CartLine, checkout::CustomerDetails};

/// Lifecycle of a recorded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Freshly recorded, awaiting fulfilment.
    New,
    /// Payment confirmed by the customer (bank-transfer orders).
    Confirmed,
    /// Abandoned before completion.
    Abandoned,
}

/// One order line: a cart line with its computed line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog id of the item.
    pub id: String,
    /// Display name at the time the item was added.
    pub name: String,
    /// Unit price in minor units.
    pub price: u64,
    /// Units ordered.
    pub quantity: u64,
    /// `price * quantity`, precomputed for the order record.
    pub total_price: u64,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            total_price: line.line_total(),
        }
    }
}

/// A submitted order, as appended to the order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique id minted when the details form is submitted.
    pub order_id: Uuid,
    /// Stable session identity from the order log collaborator.
    pub user_id: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order was built for submission.
    pub placed_at: Timestamp,
    /// Sum of all line quantities.
    pub total_items: u64,
    /// Final charged amount in minor units, delivery fee included.
    pub total_cost: u64,
    /// The ordered lines with their computed totals.
    pub items: Vec<OrderLine>,
    /// The customer details as validated at submission.
    pub customer: CustomerDetails,
    /// Which surface produced the order.
    pub source: String,
}

/// Derive the human-presentable payment reference for an order.
///
/// Bank-transfer customers quote this string when wiring the money, so it
/// must be reproducible from the order id alone.
#[must_use]
pub fn payment_reference(prefix: &str, order_id: Uuid) -> String {
    format!("{prefix}{}", order_id.to_string().to_uppercase())
}
