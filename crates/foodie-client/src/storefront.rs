//! # Storefront
//!
//! Owns one of everything: config, cart, progress, catalog loader and
//! checkout. Views receive clones of the handles they need from here rather
//! than reaching for globals.

use crate::cart::CartStore;
use crate::catalog::{self, CatalogRequest};
use crate::checkout::CheckoutFlow;
use crate::config::ClientConfig;
use crate::progress::UserProgress;
use foodie_core::{MealCatalog, StoreResult};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Shared storefront state
#[derive(Clone)]
pub struct Storefront {
    config: ClientConfig,
    cart: CartStore,
    progress: UserProgress,
    catalog: CatalogRequest,
    checkout: CheckoutFlow,
}

impl Storefront {
    /// Wire a storefront for `config`, seeding the catalog with `initial`
    pub fn new(config: ClientConfig, initial: MealCatalog) -> StoreResult<Self> {
        config.validate()?;
        let client = config.http_client()?;

        let cart = CartStore::new();
        let progress = UserProgress::new();
        let catalog = catalog::catalog_request(client.clone(), &config, initial);
        let checkout = CheckoutFlow::from_config(client, &config, cart.clone(), progress.clone());

        Ok(Self {
            config,
            cart,
            progress,
            catalog,
            checkout,
        })
    }

    /// Config from the environment, catalog seeded from the bundled file
    pub fn from_env() -> StoreResult<Self> {
        let config = ClientConfig::from_env()?;
        let initial = catalog::load_bundled_catalog()?;
        Self::new(config, initial)
    }

    /// Fire every load-on-start request. Later calls do nothing.
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        info!(api = %self.config.api_base_url, "starting storefront");
        self.catalog.start().into_iter().collect()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn catalog_request(&self) -> &CatalogRequest {
        &self.catalog
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Meals currently on offer
    pub fn catalog(&self) -> MealCatalog {
        catalog::current_catalog(&self.catalog)
    }

    /// Add one unit of the catalog meal `meal_id`.
    ///
    /// Returns false when the meal is not in the current catalog.
    pub fn add_to_cart(&self, meal_id: &str) -> bool {
        match self.catalog().get(meal_id) {
            Some(meal) => {
                self.cart.add_meal(meal);
                true
            }
            None => {
                warn!(meal_id, "meal not in catalog");
                false
            }
        }
    }

    /// Header button text, e.g. `Cart (3)`
    pub fn header_label(&self) -> String {
        format!("Cart ({})", self.cart.item_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodie_core::{Meal, Price};

    fn seeded() -> Storefront {
        let mut meals = MealCatalog::new();
        meals.add(Meal::new("m1", "Mac & Cheese", Price::new(8.99)));
        Storefront::new(ClientConfig::default(), meals).unwrap()
    }

    #[test]
    fn test_header_label_counts_units() {
        let store = seeded();
        assert_eq!(store.header_label(), "Cart (0)");

        assert!(store.add_to_cart("m1"));
        assert!(store.add_to_cart("m1"));
        assert_eq!(store.header_label(), "Cart (2)");
    }

    #[test]
    fn test_unknown_meal_not_added() {
        let store = seeded();
        assert!(!store.add_to_cart("nope"));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_checkout_shares_cart() {
        let store = seeded();
        store.add_to_cart("m1");
        assert_eq!(store.checkout().total(), Price::new(8.99));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(Storefront::new(ClientConfig::new("ftp://meals"), MealCatalog::new()).is_err());
    }
}
