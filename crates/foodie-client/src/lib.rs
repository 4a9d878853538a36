//! # foodie-client
//!
//! Runtime side of the foodie storefront.
//!
//! 1. **RequestHook** - one JSON endpoint with observable lifecycle
//!    - `Idle` / `Loading` / `Succeeded` / `Failed`
//!    - load-on-start for GET-style hooks
//!    - stale responses from overlapping calls are dropped
//!
//! 2. **CartStore** / **UserProgress** - shared, observable stores
//!
//! 3. **CheckoutFlow** - validates, posts the order, clears the cart on
//!    acknowledgement
//!
//! 4. **Storefront** - wires all of the above for one backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use foodie_client::{Storefront, CheckoutPhase};
//! use foodie_core::Customer;
//!
//! let store = Storefront::from_env()?;
//! for handle in store.start() {
//!     handle.await?;
//! }
//!
//! store.add_to_cart("m1");
//! store.progress().show_checkout();
//!
//! let customer = Customer::new("Ada", "ada@example.com", "1 Way", "12345", "London");
//! if let CheckoutPhase::Success(_) = store.checkout().submit(customer).await? {
//!     store.checkout().acknowledge();
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod progress;
pub mod request;
pub mod storefront;
pub mod telemetry;

// Re-exports
pub use cart::CartStore;
pub use catalog::{catalog_request, load_bundled_catalog, load_catalog_file, CatalogRequest};
pub use checkout::{CheckoutFlow, CheckoutPhase};
pub use config::ClientConfig;
pub use progress::UserProgress;
pub use request::{RequestConfig, RequestHook, RequestState};
pub use storefront::Storefront;
