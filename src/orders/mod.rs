//! Orders
//!
//! The order record, the order-log collaborator seam, and the checkout
//! state machine that sequences a transferred cart through submission.

pub mod errors;
pub mod flow;
pub mod log;
pub mod models;

pub use errors::CheckoutError;
pub use flow::{CheckoutFlow, FlowState};
pub use log::{MemoryOrderLog, MockOrderLog, OrderLog, OrderLogError};
pub use models::{Order, OrderLine, OrderStatus, payment_reference};
