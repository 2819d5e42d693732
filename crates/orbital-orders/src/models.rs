//! Internal API request/response types for the orders service.
//!
//! These types are internal to `orbital-orders` and are not exposed to
//! consumers. External consumers use the DTOs defined in `orbital-core`.

use std::collections::HashMap;
use std::time::Duration;

use orbital_core::{BulkResult, Order};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::OrdersClientConfig;
use crate::error::ClientResult;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

/// Internal configuration for the orders client.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Base URL, always ending in `/` so resource paths join under it
    pub base_url: Url,
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Connect timeout and JSON request timeout
    pub timeout: Duration,
    /// API key sent as the basic auth user name
    pub api_key: Option<String>,
    /// Upper bound on simultaneous downloads (at least 1)
    pub max_concurrent_downloads: usize,
}

impl OrdersConfig {
    /// Derive the internal configuration from the public one.
    pub fn from_public(config: &OrdersClientConfig) -> ClientResult<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            base_url: Url::parse(&base)?,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            api_key: config.api_key.clone(),
            max_concurrent_downloads: config.max_concurrent_downloads.max(1),
        })
    }
}

#[cfg(test)]
impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://orders.test/").expect("test base URL is valid"),
            user_agent: "orbital-orders-test".to_string(),
            timeout: Duration::from_secs(5),
            api_key: None,
            max_concurrent_downloads: 4,
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

/// One page of the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderPage {
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Cursor links of a listing page.
#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
    /// Absolute URL of the following page; absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

// ============================================================================
// Bulk cancellation
// ============================================================================

/// Request body for bulk cancellation.
///
/// Serializes to `{}` when no ids are given, which the service reads as
/// "all cancellable orders".
#[derive(Debug, Serialize)]
pub struct BulkCancelRequest<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_ids: Vec<&'a str>,
}

/// Response envelope for bulk cancellation.
#[derive(Debug, Deserialize)]
pub struct BulkCancelResponse {
    pub result: BulkResult,
}

// ============================================================================
// Manifest
// ============================================================================

/// `manifest.json` delivered alongside order results.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
}

/// One file listed in the manifest.
#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the manifest's directory
    pub path: String,
    /// Digests keyed by algorithm (`md5`, `sha256`)
    #[serde(default)]
    pub digests: HashMap<String, String>,
}
