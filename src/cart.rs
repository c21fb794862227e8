//! Cart
//!
//! The in-memory shopping cart: one line per catalog item id, with the
//! name and price locked in at the time the item was added. Totals are
//! always derived from the lines, never cached.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::products::Product;

/// One catalog item id with its quantity and locked-in price.
///
/// This is also the wire shape the cart is persisted in, so the field
/// names are part of the stored format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog id of the item.
    pub id: String,
    /// Display name at the time the item was added.
    pub name: String,
    /// Unit price in minor units at the time the item was added.
    pub price: u64,
    /// Always at least 1; a line that would reach 0 is removed instead.
    pub quantity: u64,
}

impl CartLine {
    /// The line total, `price * quantity`, in minor units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price * self.quantity
    }
}

/// An id-keyed shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: FxHashMap<String, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines.
    ///
    /// Duplicate ids are merged and non-positive quantities dropped, so
    /// the cart invariants hold even for lines read back from storage.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            cart.lines
                .entry(line.id.clone())
                .and_modify(|existing| existing.quantity += line.quantity)
                .or_insert(line);
        }

        cart
    }

    /// Add one unit of the given product.
    ///
    /// Inserts a new line at quantity 1 if the product is not in the cart
    /// yet; otherwise increments the existing line.
    pub fn add_item(&mut self, product: &Product) {
        self.lines
            .entry(product.id.clone())
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
    }

    /// Adjust the quantity of an existing line by `delta`.
    ///
    /// A resulting quantity of zero or below deletes the line entirely;
    /// decrementing past one is how "remove item" is modelled. Ids not in
    /// the cart are ignored.
    pub fn change_quantity(&mut self, id: &str, delta: i64) {
        let Some(line) = self.lines.get_mut(id) else {
            return;
        };

        if delta >= 0 {
            line.quantity = line.quantity.saturating_add(delta.unsigned_abs());
            return;
        }

        let decrement = delta.unsigned_abs();

        if line.quantity > decrement {
            line.quantity -= decrement;
        } else {
            self.lines.remove(id);
        }
    }

    /// The line for the given catalog id, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Sum of `price * quantity` over all lines, in minor units.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines.values().map(CartLine::line_total).sum()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Snapshot of the lines in id order, for display and serialization.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self.lines.values().cloned().collect();
        lines.sort_by(|a, b| a.id.cmp(&b.id));
        lines
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
