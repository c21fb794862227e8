//! Products
//!
//! Catalog entries as the menu surfaces expose them. Prices are in minor
//! units of the site currency and are locked into a cart line the moment
//! the item is added.

use serde::{Deserialize, Serialize};

/// A catalog item offered on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit price in minor units.
    pub price: u64,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}
