//! URL construction helpers for the orders API.
//!
//! This module provides pure functions for building orders API URLs,
//! ensuring consistent URL construction across all API calls.

use orbital_core::{OrderId, OrderState};
use url::Url;

use crate::error::ClientResult;
use crate::models::OrdersConfig;

const ORDERS_PATH: &str = "orders/v2/";
const BULK_CANCEL_PATH: &str = "bulk/orders/v2/cancel";
const STATS_PATH: &str = "stats/orders/v2/";

/// Build the order collection URL (listing and creation).
pub fn build_orders_url(config: &OrdersConfig) -> ClientResult<Url> {
    Ok(config.base_url.join(ORDERS_PATH)?)
}

/// Build the first listing page URL, optionally filtered by state.
pub fn build_list_url(config: &OrdersConfig, state: Option<OrderState>) -> ClientResult<Url> {
    let mut url = build_orders_url(config)?;
    if let Some(state) = state {
        url.query_pairs_mut().append_pair("state", state.as_str());
    }
    Ok(url)
}

/// Build the URL of a single order (fetch and cancel).
pub fn build_order_url(config: &OrdersConfig, order_id: &OrderId) -> ClientResult<Url> {
    let orders = build_orders_url(config)?;
    Ok(orders.join(&urlencoding::encode(order_id.as_str()))?)
}

/// Build the bulk cancellation URL.
pub fn build_bulk_cancel_url(config: &OrdersConfig) -> ClientResult<Url> {
    Ok(config.base_url.join(BULK_CANCEL_PATH)?)
}

/// Build the aggregated statistics URL.
pub fn build_stats_url(config: &OrdersConfig) -> ClientResult<Url> {
    Ok(config.base_url.join(STATS_PATH)?)
}

/// Render a URL for errors and logs without its query or fragment.
///
/// Result locations are pre-signed and carry their credentials in the query.
pub fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> OrdersConfig {
        OrdersConfig::default()
    }

    fn oid() -> OrderId {
        OrderId::parse("5ece1dc0-ea81-11eb-837c-acde48001122").unwrap()
    }

    #[test]
    fn test_build_orders_url() {
        let url = build_orders_url(&default_config()).unwrap();
        assert_eq!(url.as_str(), "http://orders.test/orders/v2/");
    }

    #[test]
    fn test_build_list_url_without_state() {
        let url = build_list_url(&default_config(), None).unwrap();
        assert_eq!(url.as_str(), "http://orders.test/orders/v2/");
    }

    #[test]
    fn test_build_list_url_with_state() {
        let url = build_list_url(&default_config(), Some(OrderState::Failed)).unwrap();
        assert_eq!(url.as_str(), "http://orders.test/orders/v2/?state=failed");
    }

    #[test]
    fn test_build_order_url() {
        let url = build_order_url(&default_config(), &oid()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://orders.test/orders/v2/5ece1dc0-ea81-11eb-837c-acde48001122"
        );
    }

    #[test]
    fn test_build_urls_under_nested_base() {
        let config = OrdersConfig {
            base_url: Url::parse("https://api.example.com/compute/ops/").unwrap(),
            ..Default::default()
        };

        assert_eq!(
            build_bulk_cancel_url(&config).unwrap().as_str(),
            "https://api.example.com/compute/ops/bulk/orders/v2/cancel"
        );
        assert_eq!(
            build_stats_url(&config).unwrap().as_str(),
            "https://api.example.com/compute/ops/stats/orders/v2/"
        );
        assert_eq!(
            build_order_url(&config, &oid()).unwrap().as_str(),
            "https://api.example.com/compute/ops/orders/v2/5ece1dc0-ea81-11eb-837c-acde48001122"
        );
    }

    #[test]
    fn test_redacted_drops_query_and_fragment() {
        let url = Url::parse("https://dl.example.com/download/scene.tif?token=s3cr3t#part").unwrap();
        assert_eq!(redacted(&url), "https://dl.example.com/download/scene.tif");

        let plain = Url::parse("http://orders.test/orders/v2/abc").unwrap();
        assert_eq!(redacted(&plain), "http://orders.test/orders/v2/abc");
    }
}
