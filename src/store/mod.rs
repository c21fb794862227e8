//! Cart transfer channel
//!
//! The durable hand-off between the menu and checkout surfaces. The cart
//! crosses the page boundary only through a string-keyed store; this
//! module is the single source of truth for the key and the serialized
//! format.

use serde_json::Error as JsonError;
use thiserror::Error;
use tracing::warn;

use crate::cart::{Cart, CartLine};

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The key the checkout surface reads the transferred cart from.
pub const CHECKOUT_CART_KEY: &str = "checkoutCart";

/// Errors raised by the durable key-value backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage I/O failed.
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized for storage.
    #[error("failed to serialize cart")]
    Serialize(#[from] JsonError),
}

/// A durable string-keyed store surviving page navigation within a
/// session.
///
/// Values are only ever written or removed whole, never patched, so
/// last-writer-wins is the consistency model across surfaces.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` entirely. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend could not be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// The cart's serialization channel over a [`KeyValueStore`] backend.
#[derive(Debug)]
pub struct CartStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Wrap a backend.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Persist the cart under [`CHECKOUT_CART_KEY`].
    ///
    /// An empty cart removes the stored value entirely rather than
    /// writing an empty structure; the key's absence is the signal the
    /// checkout surface uses to detect "nothing to check out".
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the cart could not be serialized or
    /// the backend could not be written.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        if cart.is_empty() {
            return self.backend.remove(CHECKOUT_CART_KEY);
        }

        let value = serde_json::to_string(&cart.lines())?;

        self.backend.set(CHECKOUT_CART_KEY, &value)
    }

    /// Read the stored cart back.
    ///
    /// A missing, malformed or empty value yields an empty cart; read and
    /// parse faults are logged and swallowed rather than surfaced.
    #[must_use]
    pub fn load(&self) -> Cart {
        let value = match self.backend.get(CHECKOUT_CART_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return Cart::new(),
            Err(error) => {
                warn!("failed to read stored cart: {error}");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Vec<CartLine>>(&value) {
            Ok(lines) => Cart::from_lines(lines),
            Err(error) => {
                warn!("discarding malformed stored cart: {error}");
                Cart::new()
            }
        }
    }

    /// Remove the stored cart. Clearing an already-empty store is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend could not be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(CHECKOUT_CART_KEY)
    }
}
