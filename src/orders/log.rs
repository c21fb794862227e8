//! Order log collaborator.
//!
//! The external system of record for submitted orders. The flow needs
//! exactly two things from it: a stable session identity and an append
//! that either durably records the order or reports failure.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::orders::models::Order;

/// Errors from the order log collaborator.
#[derive(Debug, Error)]
pub enum OrderLogError {
    /// The collaborator rejected the order outright.
    #[error("order log rejected the order")]
    Rejected,

    /// The collaborator could not be reached or failed mid-append.
    #[error("order log unavailable: {0}")]
    Unavailable(String),
}

/// The external system of record for submitted orders.
#[automock]
#[async_trait]
pub trait OrderLog: Send + Sync {
    /// Durably record the order. There are no partial-success semantics:
    /// the order is either recorded whole or not at all.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderLogError`] if the order could not be recorded.
    async fn append_order(&self, order: Order) -> Result<(), OrderLogError>;

    /// Stable identity for the current session, anonymous or
    /// authenticated.
    fn user_id(&self) -> String;
}

/// An in-process order log.
///
/// Stands in when no remote backend is wired up; the session identity is
/// an anonymous UUID minted at construction.
#[derive(Debug)]
pub struct MemoryOrderLog {
    user_id: String,
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderLog {
    /// Create an empty log with a fresh anonymous session id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_id: Uuid::now_v7().to_string(),
            orders: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of every order appended so far, in append order.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MemoryOrderLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderLog for MemoryOrderLog {
    async fn append_order(&self, order: Order) -> Result<(), OrderLogError> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order);

        Ok(())
    }

    fn user_id(&self) -> String {
        self.user_id.clone()
    }
}
