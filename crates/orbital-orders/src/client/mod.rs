//! Orders client for submitting, tracking and retrieving orders.
//!
//! This module provides the main client interface; the operations are
//! split by concern into the submodules.

mod bulk;
mod download;
mod paging;
mod poll;

use orbital_core::{Order, OrderId, OrderStats, OrdersPortError, OrdersPortResult};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::OrdersClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::OrdersConfig;
use crate::url::{build_order_url, build_orders_url, build_stats_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default orders client using the reqwest HTTP backend.
pub type DefaultOrdersClient = OrdersClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the orders service.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultOrdersClient` for production code and talk to it through
/// the `OrdersClientPort` trait.
pub struct OrdersClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: OrdersConfig,
}

impl DefaultOrdersClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with `OrdersPortError::Configuration` if the base URL does not
    /// parse or the HTTP client cannot be built.
    pub fn new(config: &OrdersClientConfig) -> OrdersPortResult<Self> {
        let config = OrdersConfig::from_public(config).map_err(configuration_error)?;
        let backend = ReqwestBackend::new(&config).map_err(configuration_error)?;
        Ok(Self { backend, config })
    }

    /// Create a client configured from the environment.
    ///
    /// See [`OrdersClientConfig::from_env`].
    pub fn from_env() -> OrdersPortResult<Self> {
        Self::new(&OrdersClientConfig::from_env())
    }
}

fn configuration_error(err: impl std::fmt::Display) -> OrdersPortError {
    OrdersPortError::Configuration {
        message: err.to_string(),
    }
}

impl<B: HttpBackend> OrdersClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: OrdersConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Submit an order request.
    pub(crate) async fn create_order(&self, request: &Value) -> ClientResult<Order> {
        let url = build_orders_url(&self.config)?;
        let order: Order = self
            .backend
            .request_json(Method::POST, &url, Some(request))
            .await?;
        info!(order_id = %order.id, state = %order.state, "Order created");
        Ok(order)
    }

    /// Fetch an order snapshot.
    pub(crate) async fn get_order(&self, order_id: &OrderId) -> ClientResult<Order> {
        let url = build_order_url(&self.config, order_id)?;
        self.backend.request_json(Method::GET, &url, None).await
    }

    /// Cancel a single order.
    pub(crate) async fn cancel_order(&self, order_id: &OrderId) -> ClientResult<Order> {
        let url = build_order_url(&self.config, order_id)?;
        debug!(order_id = %order_id, "Cancelling order");
        self.backend.request_json(Method::PUT, &url, None).await
    }

    /// Fetch queued and running counts for the user and organization.
    pub(crate) async fn aggregated_order_stats(&self) -> ClientResult<OrderStats> {
        let url = build_stats_url(&self.config)?;
        self.backend.request_json(Method::GET, &url, None).await
    }
}
