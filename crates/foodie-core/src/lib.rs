//! # foodie-core
//!
//! Core types for the foodie storefront.
//!
//! This crate provides:
//! - `CartState` and `CartItem`, the pure cart reducer
//! - `Meal`, `Price` and `MealCatalog` for the catalog
//! - `Customer` and `OrderRequest` for the order payload
//! - `Progress` for the storefront overlays
//! - `StoreError` for typed error handling
//!
//! Nothing here performs I/O; the HTTP lifecycle and the shared stores live
//! in `foodie-client`.
//!
//! ## Example
//!
//! ```rust
//! use foodie_core::{CartState, Meal, Price};
//!
//! let pizza = Meal::new("m1", "Margherita", Price::from_cents(1299));
//!
//! let cart = CartState::new()
//!     .with_item_added(&pizza.to_cart_item())
//!     .with_item_added(&pizza.to_cart_item());
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().display(), "$25.98");
//! ```

pub mod cart;
pub mod error;
pub mod order;
pub mod product;
pub mod progress;

// Re-exports for convenience
pub use cart::{CartItem, CartState};
pub use error::{StoreError, StoreResult, GENERIC_FAILURE_MESSAGE, REQUEST_FAILURE_MESSAGE};
pub use order::{Customer, OrderPayload, OrderRequest};
pub use product::{Meal, MealCatalog, Price};
pub use progress::Progress;
