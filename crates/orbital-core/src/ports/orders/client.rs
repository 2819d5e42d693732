//! Orders client port trait.

use std::path::Path;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use super::error::OrdersPortResult;
use super::types::PollOptions;
use crate::domain::{BulkResult, DownloadedFile, Order, OrderState, OrderStats};
use crate::ports::StateReporter;

/// Lazy stream of orders produced by following `next` links.
pub type OrderStream<'a> = BoxStream<'a, OrdersPortResult<Order>>;

/// Port trait for order lifecycle operations.
///
/// # Design
///
/// - Identifiers and states arrive as strings and are validated before any
///   request; malformed input fails with `OrdersPortError::Validation`
/// - Returns `OrdersPortError` for all failures
/// - Every returned `Order` is a snapshot; re-fetch to observe changes
#[async_trait]
pub trait OrdersClientPort: Send + Sync {
    /// List orders, following `next` links lazily.
    ///
    /// `limit` of `None` caps the listing at 100 orders; `Some(0)` removes
    /// the cap. Once the cap is met no further page is requested.
    ///
    /// # Arguments
    ///
    /// * `state` - Only list orders in this state (e.g. `failed`)
    /// * `limit` - Maximum number of orders to yield
    fn list_orders(&self, state: Option<&str>, limit: Option<usize>)
    -> OrdersPortResult<OrderStream<'_>>;

    /// Submit a new order. The request body is built by the caller.
    async fn create_order(&self, request: &serde_json::Value) -> OrdersPortResult<Order>;

    /// Fetch the current snapshot of an order.
    async fn get_order(&self, order_id: &str) -> OrdersPortResult<Order>;

    /// Cancel a single order.
    async fn cancel_order(&self, order_id: &str) -> OrdersPortResult<Order>;

    /// Cancel several orders at once.
    ///
    /// An empty slice asks the service to cancel every cancellable order.
    async fn cancel_orders(&self, order_ids: &[&str]) -> OrdersPortResult<BulkResult>;

    /// Fetch queued/running order counts for the user and organization.
    async fn aggregated_order_stats(&self) -> OrdersPortResult<OrderStats>;

    /// Poll an order until it reaches the requested (or any terminal) state.
    ///
    /// `reporter` is called once for every distinct state observed.
    async fn poll(
        &self,
        order_id: &str,
        options: &PollOptions,
        reporter: &dyn StateReporter,
    ) -> OrdersPortResult<OrderState>;

    /// Download one result location into `directory`.
    ///
    /// When the target file exists and `overwrite` is false the existing
    /// file is returned untouched.
    async fn download_asset(
        &self,
        location: &str,
        directory: &Path,
        overwrite: bool,
    ) -> OrdersPortResult<DownloadedFile>;

    /// Download every result of an order into `directory`.
    ///
    /// Files are returned in the order the service lists the results.
    async fn download_order(
        &self,
        order_id: &str,
        directory: &Path,
        overwrite: bool,
    ) -> OrdersPortResult<Vec<DownloadedFile>>;
}
