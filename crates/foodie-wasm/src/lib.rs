//! # foodie-wasm
//!
//! WebAssembly bindings for the foodie storefront.
//!
//! This crate exposes the cart reducer to a browser view layer:
//! - Adding and removing meals with quantity aggregation
//! - Cart totals and price formatting
//! - Building and validating the order body before it is posted
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCart, build_order_payload } from 'foodie-wasm';
//!
//! await init();
//!
//! const cart = new WasmCart();
//! cart.add_item('m1', 'Mac & Cheese', 899);
//! cart.add_item('m1', 'Mac & Cheese', 899);
//!
//! console.log(`Cart (${cart.item_count})`, cart.format_total());
//!
//! const body = build_order_payload(cart, Object.fromEntries(new FormData(form)));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use foodie_core::{CartItem, CartState, Customer, OrderRequest, Price, StoreError};
use wasm_bindgen::prelude::*;

/// Cart owned by the JavaScript side
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct WasmCart {
    state: CartState,
}

#[wasm_bindgen]
impl WasmCart {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: CartState::new(),
        }
    }

    /// Add one unit of a meal
    #[wasm_bindgen]
    pub fn add_item(&mut self, id: String, name: String, price_cents: i64) {
        let candidate = CartItem::new(id, name, Price::from_cents(price_cents));
        self.state = self.state.with_item_added(&candidate);
    }

    /// Remove one unit; unknown IDs are ignored
    #[wasm_bindgen]
    pub fn remove_item(&mut self, id: &str) {
        self.state = self.state.with_item_removed(id);
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.state = CartState::new();
    }

    /// Units in the cart (header badge)
    #[wasm_bindgen(getter)]
    pub fn item_count(&self) -> u32 {
        self.state.item_count()
    }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Cart total in cents
    #[wasm_bindgen]
    pub fn total_cents(&self) -> i64 {
        self.state.total().cents()
    }

    /// Format total for display
    #[wasm_bindgen]
    pub fn format_total(&self) -> String {
        self.state.total().display()
    }

    /// Items as `[{ id, name, price, quantity }]`
    #[wasm_bindgen]
    pub fn items(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.items())
            .map_err(|e| JsValue::from_str(&format!("Failed to export cart items: {}", e)))
    }
}

impl WasmCart {
    /// Order body for `customer`, validated
    fn order_json(&self, customer: Customer) -> Result<String, StoreError> {
        let order = OrderRequest::new(&self.state, customer);
        order.validate()?;
        serde_json::to_string(&order).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// Build the JSON body for the order endpoint.
///
/// `customer` is a plain object of form fields (`name` or `full-name`,
/// `email`, `street`, `postal-code`, `city`).
#[wasm_bindgen]
pub fn build_order_payload(cart: &WasmCart, customer: JsValue) -> Result<String, JsValue> {
    let customer = customer_from_js(customer)?;
    cart.order_json(customer)
        .map_err(|e| JsValue::from_str(&e.user_message()))
}

/// Check form fields without building an order
#[wasm_bindgen]
pub fn validate_customer(customer: JsValue) -> Result<(), JsValue> {
    customer_from_js(customer)?
        .validate()
        .map_err(|e| JsValue::from_str(&e.user_message()))
}

fn customer_from_js(customer: JsValue) -> Result<Customer, JsValue> {
    serde_wasm_bindgen::from_value(customer)
        .map_err(|e| JsValue::from_str(&format!("Invalid customer fields: {}", e)))
}

/// Format a price in cents to display string
#[wasm_bindgen]
pub fn format_price(cents: i64) -> String {
    Price::from_cents(cents).display()
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer::new("Ada Lovelace", "ada@example.com", "1 Analytical Way", "12345", "London")
    }

    #[test]
    fn test_cart_total() {
        let mut cart = WasmCart::new();
        cart.add_item("m1".into(), "Mac & Cheese".into(), 899);
        cart.add_item("m1".into(), "Mac & Cheese".into(), 899);
        cart.add_item("m2".into(), "Pizza".into(), 1299);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_cents(), 3097);
        assert_eq!(cart.format_total(), "$30.97");

        cart.remove_item("m1");
        cart.remove_item("unknown");
        assert_eq!(cart.total_cents(), 2198);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1999), "$19.99");
        assert_eq!(format_price(100), "$1.00");
    }

    #[test]
    fn test_order_json() {
        let mut cart = WasmCart::new();
        cart.add_item("m1".into(), "Mac & Cheese".into(), 899);

        let body: serde_json::Value =
            serde_json::from_str(&cart.order_json(customer()).unwrap()).unwrap();
        assert_eq!(body["order"]["items"][0]["price"], serde_json::json!(8.99));
        assert_eq!(body["order"]["customer"]["postal-code"], "12345");
    }

    #[test]
    fn test_order_json_rejects_empty_cart() {
        let mut cart = WasmCart::new();
        cart.add_item("m1".into(), "Mac & Cheese".into(), 899);
        cart.clear();

        assert!(cart.is_empty());
        assert!(matches!(
            cart.order_json(customer()),
            Err(StoreError::Validation { .. })
        ));
    }
}
