//! # Client Configuration
//!
//! Where the storefront's backend lives and how long to wait for it.
//! Values come from environment variables (a `.env` file is honored).

use foodie_core::{StoreError, StoreResult};
use reqwest::Client;
use std::env;
use std::time::Duration;

/// Default backend address (the meals/orders dev server)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash
    pub api_base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `FOODIE_API_BASE_URL` (default `http://localhost:3000`)
    /// - `FOODIE_REQUEST_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> StoreResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url =
            env::var("FOODIE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("FOODIE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                StoreError::Configuration(format!(
                    "FOODIE_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(StoreError::Configuration(
                "FOODIE_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let config = Self::new(api_base_url).with_timeout(Duration::from_secs(timeout_secs));
        config.validate()?;
        Ok(config)
    }

    /// Create config with an explicit base URL (for testing)
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the base URL is an http(s) address
    pub fn validate(&self) -> StoreResult<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(StoreError::Configuration(format!(
                "FOODIE_API_BASE_URL must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        Ok(())
    }

    /// Order submission endpoint
    pub fn orders_url(&self) -> String {
        format!("{}/orders", self.api_base_url)
    }

    /// Catalog endpoint
    pub fn meals_url(&self) -> String {
        format!("{}/meals", self.api_base_url)
    }

    /// Build the shared HTTP client
    pub fn http_client(&self) -> StoreResult<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| StoreError::Configuration(format!("Failed to create HTTP client: {}", e)))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::new("https://food.example.com/");

        assert_eq!(config.orders_url(), "https://food.example.com/orders");
        assert_eq!(config.meals_url(), "https://food.example.com/meals");
    }

    #[test]
    fn test_validate_scheme() {
        assert!(ClientConfig::new("http://localhost:3000").validate().is_ok());
        assert!(ClientConfig::new("localhost:3000").validate().is_err());
    }

    #[test]
    fn test_from_env_timeout() {
        env::set_var("FOODIE_REQUEST_TIMEOUT_SECS", "soon");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(StoreError::Configuration(_))
        ));

        env::set_var("FOODIE_REQUEST_TIMEOUT_SECS", "0");
        assert!(ClientConfig::from_env().is_err());

        env::set_var("FOODIE_REQUEST_TIMEOUT_SECS", "5");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        env::remove_var("FOODIE_REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_http_client_builds() {
        assert!(ClientConfig::default().http_client().is_ok());
    }
}
