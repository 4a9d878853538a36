//! # Catalog Loading
//!
//! The meal list comes from `GET {base}/meals` through a load-on-start
//! `RequestHook`. A bundled TOML catalog, when one is found, seeds the
//! hook's initial data so the storefront has something to show before (or
//! instead of) the first response.

use crate::config::ClientConfig;
use crate::request::{RequestConfig, RequestHook};
use foodie_core::{Meal, MealCatalog, StoreError, StoreResult};
use reqwest::Client;
use std::path::Path;
use tracing::{info, warn};

/// Lifecycle hook over the meals endpoint
pub type CatalogRequest = RequestHook<Vec<Meal>>;

/// Where a bundled catalog is looked for, relative to the working directory
pub const CATALOG_FIXTURE_PATHS: [&str; 3] = [
    "config/meals.toml",
    "../config/meals.toml",
    "../../config/meals.toml",
];

/// Build the catalog hook (GET, load-on-start) seeded with `initial`
pub fn catalog_request(client: Client, config: &ClientConfig, initial: MealCatalog) -> CatalogRequest {
    RequestHook::new(
        client,
        config.meals_url(),
        RequestConfig::get(),
        Some(initial.meals),
    )
}

/// Current catalog as seen through the hook
pub fn current_catalog(request: &CatalogRequest) -> MealCatalog {
    MealCatalog::from(request.data().unwrap_or_default())
}

/// Load a catalog from a TOML file
pub fn load_catalog_file(path: impl AsRef<Path>) -> StoreResult<MealCatalog> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        StoreError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;

    MealCatalog::from_toml(&content)
        .map_err(|e| StoreError::Configuration(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load the first bundled catalog found, or an empty one
pub fn load_bundled_catalog() -> StoreResult<MealCatalog> {
    for path in CATALOG_FIXTURE_PATHS {
        if Path::new(path).exists() {
            let catalog = load_catalog_file(path)?;
            info!("Loaded {} meals from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    warn!("No bundled catalog found, starting with an empty one");
    Ok(MealCatalog::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_catalog_file() {
        let path = std::env::temp_dir().join(format!("foodie-meals-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[[meals]]\nid = \"m1\"\nname = \"Mac & Cheese\"\nprice = \"8.99\"\n"
        )
        .unwrap();

        let catalog = load_catalog_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("m1").unwrap().price.cents(), 899);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = load_catalog_file("/definitely/not/here/meals.toml");
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[test]
    fn test_catalog_request_targets_meals() {
        let config = ClientConfig::new("http://localhost:3000");
        let request = catalog_request(Client::new(), &config, MealCatalog::new());

        assert_eq!(request.url(), "http://localhost:3000/meals");
        assert_eq!(request.method(), &reqwest::Method::GET);
        assert!(current_catalog(&request).is_empty());
    }
}
