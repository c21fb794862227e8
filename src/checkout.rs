//! Checkout form and validator
//!
//! Customer identity, contact and delivery details, with required-field
//! rules that branch on the delivery method, and the final-total
//! computation that adds the delivery surcharge.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

const NAME_REQUIRED: &str = "Full Name is required.";
const CONTACT_REQUIRED: &str = "Contact (Phone/Email) is required.";
const ADDRESS_REQUIRED: &str = "Delivery Address is required for delivery orders.";

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Collected in store; no surcharge.
    #[default]
    Pickup,
    /// Couriered to the customer's address; adds the delivery fee.
    Delivery,
}

/// Customer identity, contact and delivery details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Customer's full name.
    pub name: String,
    /// Phone number or email address. Presence only; no format rule is
    /// applied beyond a non-blank value.
    pub contact: String,
    /// Delivery address; required only for delivery orders.
    pub address: String,
    /// Pickup or delivery.
    pub delivery: DeliveryMethod,
    /// Free-form instructions (allergies, gate codes, and so on).
    pub notes: String,
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The customer's full name.
    Name,
    /// Phone or email.
    Contact,
    /// The delivery address.
    Address,
}

/// Per-field validation messages; empty means the details are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: FxHashMap<Field, &'static str>,
}

impl ValidationErrors {
    /// True when no field has a pending message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of fields currently failing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// The message for one field, if it is failing.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.messages.get(&field).copied()
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.messages.insert(field, message);
    }

    fn clear(&mut self, field: Field) {
        self.messages.remove(&field);
    }
}

/// Validate customer details, producing a message for exactly the fields
/// that fail.
///
/// Contact is presence-checked only; no phone or email pattern is
/// applied. The address is required only when the delivery method is
/// [`DeliveryMethod::Delivery`].
#[must_use]
pub fn validate(details: &CustomerDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if details.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if details.contact.trim().is_empty() {
        errors.insert(Field::Contact, CONTACT_REQUIRED);
    }

    if details.delivery == DeliveryMethod::Delivery && details.address.trim().is_empty() {
        errors.insert(Field::Address, ADDRESS_REQUIRED);
    }

    errors
}

/// The amount charged at submission, in minor units: the cart subtotal
/// plus the delivery fee when the order is couriered.
#[must_use]
pub fn final_total(cart: &Cart, details: &CustomerDetails, delivery_fee: u64) -> u64 {
    let fee = match details.delivery {
        DeliveryMethod::Delivery => delivery_fee,
        DeliveryMethod::Pickup => 0,
    };

    cart.subtotal() + fee
}

/// The checkout form: customer details plus the field messages from the
/// most recent submit attempt.
///
/// Messages are recomputed only when [`CheckoutForm::validate`] runs;
/// each setter clears just its own field's message, so a correction is
/// reflected immediately without re-validating the rest of the form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    details: CustomerDetails,
    errors: ValidationErrors,
}

impl CheckoutForm {
    /// Create an empty form defaulting to pickup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The details as currently entered.
    #[must_use]
    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    /// The field messages from the most recent [`CheckoutForm::validate`].
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Set the customer's name, clearing any pending name message.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.details.name = name.into();
        self.errors.clear(Field::Name);
    }

    /// Set the contact value, clearing any pending contact message.
    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.details.contact = contact.into();
        self.errors.clear(Field::Contact);
    }

    /// Set the delivery address, clearing any pending address message.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.details.address = address.into();
        self.errors.clear(Field::Address);
    }

    /// Switch between pickup and delivery.
    pub fn set_delivery(&mut self, delivery: DeliveryMethod) {
        self.details.delivery = delivery;
    }

    /// Set the optional order notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.details.notes = notes.into();
    }

    /// Recompute every field message, returning true when the details
    /// pass.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.details);

        self.errors.is_empty()
    }
}
