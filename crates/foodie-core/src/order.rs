//! # Order Types
//!
//! The order body posted by checkout:
//!
//! ```json
//! { "order": { "items": [ { "id", "name", "price", "quantity" } ],
//!              "customer": { "name", "email", "street", "postal-code", "city" } } }
//! ```

use crate::cart::{CartItem, CartState};
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Contact and shipping details from the checkout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name
    #[serde(rename = "name", alias = "full-name")]
    pub full_name: String,

    pub email: String,

    /// Street address
    pub street: String,

    #[serde(rename = "postal-code")]
    pub postal_code: String,

    pub city: String,
}

impl Customer {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            street: street.into(),
            postal_code: postal_code.into(),
            city: city.into(),
        }
    }

    /// Build from submitted form fields (`name -> value`).
    ///
    /// Accepts both `name` and `full-name` for the name field; unknown
    /// fields are ignored and missing ones stay empty for `validate` to catch.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut customer = Customer::default();
        for (key, value) in fields {
            let slot = match key.as_ref() {
                "name" | "full-name" => &mut customer.full_name,
                "email" => &mut customer.email,
                "street" => &mut customer.street,
                "postal-code" => &mut customer.postal_code,
                "city" => &mut customer.city,
                _ => continue,
            };
            *slot = value.into();
        }
        customer
    }

    /// Reject blank fields and obviously malformed email addresses
    pub fn validate(&self) -> StoreResult<()> {
        let required = [
            ("name", &self.full_name),
            ("email", &self.email),
            ("street", &self.street),
            ("postal-code", &self.postal_code),
            ("city", &self.city),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::validation(field, format!("{} is required", field)));
            }
        }

        if !self.email.contains('@') {
            return Err(StoreError::validation(
                "email",
                "email must contain an @ sign",
            ));
        }

        Ok(())
    }
}

/// Inner `order` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub items: Vec<CartItem>,
    pub customer: Customer,
}

/// Request body for the order endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order: OrderPayload,
}

impl OrderRequest {
    /// Snapshot the cart into an order body
    pub fn new(cart: &CartState, customer: Customer) -> Self {
        Self {
            order: OrderPayload {
                items: cart.items().to_vec(),
                customer,
            },
        }
    }

    /// Validate before submission: the cart must not be empty and the
    /// customer fields must be filled in
    pub fn validate(&self) -> StoreResult<()> {
        if self.order.items.is_empty() {
            return Err(StoreError::validation("items", "cart is empty"));
        }
        self.order.customer.validate()
    }

    pub fn item_count(&self) -> u32 {
        self.order.items.iter().map(|i| i.quantity).sum()
    }
}
