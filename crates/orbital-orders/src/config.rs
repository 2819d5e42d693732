//! Public configuration for the orders client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal config is derived from this.

use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ORBITAL_API_KEY";

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "ORBITAL_BASE_URL";

/// Configuration for the orders client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use orbital_orders::OrdersClientConfig;
/// use std::time::Duration;
///
/// let config = OrdersClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_max_concurrent_downloads(8)
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct OrdersClientConfig {
    /// Base URL of the service; resource paths are joined onto it
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Connect timeout, and total timeout for JSON requests
    pub(crate) timeout: Duration,
    /// API key sent as the basic auth user name
    pub(crate) api_key: Option<String>,
    /// Upper bound on simultaneous transfers in `download_order`
    pub(crate) max_concurrent_downloads: usize,
}

impl Default for OrdersClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.planet.com/compute/ops/".to_string(),
            user_agent: concat!("orbital-orders/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
            max_concurrent_downloads: 4,
        }
    }
}

impl OrdersClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from `ORBITAL_API_KEY` and `ORBITAL_BASE_URL`.
    ///
    /// Unset or empty variables leave the defaults in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::new().with_optional_api_key(present(API_KEY_ENV));
        if let Some(base_url) = present(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        config
    }

    /// Set the base URL of the service.
    ///
    /// Defaults to `https://api.planet.com/compute/ops/`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. Download bodies are not bound by it.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API key used to authenticate requests.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set an optional API key.
    #[must_use]
    pub fn with_optional_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set how many result files `download_order` transfers at once.
    ///
    /// Defaults to 4. Zero is treated as 1.
    #[must_use]
    pub const fn with_max_concurrent_downloads(mut self, max: usize) -> Self {
        self.max_concurrent_downloads = max;
        self
    }
}
