//! Port trait implementation for `OrdersClient`.
//!
//! This module implements the core-owned `OrdersClientPort` trait for
//! `OrdersClient`. String inputs are validated here, before any request, and
//! internal errors are converted to `OrdersPortError` exactly once.

use std::path::Path;

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use orbital_core::{
    BulkResult, DownloadedFile, Order, OrderId, OrderState, OrderStats, OrderStream,
    OrdersClientPort, OrdersPortError, OrdersPortResult, PollOptions, StateReporter,
    ValidationError,
};
use serde_json::Value;
use url::Url;

use crate::client::OrdersClient;
use crate::error::ClientError;
use crate::http::HttpBackend;
use crate::parsing::{bad_query_message, server_message};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ClientError` to core `OrdersPortError`.
pub(crate) fn map_error(err: ClientError) -> OrdersPortError {
    match err {
        ClientError::Validation(e) => OrdersPortError::Validation(e),
        ClientError::ApiRequestFailed { status, url, body } => map_status(status, &url, &body),
        ClientError::PageCycle { url } => OrdersPortError::Paging {
            message: format!("page cycle detected: {url} was already fetched"),
        },
        err @ ClientError::InvalidManifest { .. } => OrdersPortError::InvalidResponse {
            message: err.to_string(),
        },
        ClientError::ChecksumMismatch {
            path,
            expected,
            actual,
        } => OrdersPortError::ChecksumMismatch {
            path,
            expected,
            actual,
        },
        // Transport errors name the full URL, signed query included.
        ClientError::Network(e) => OrdersPortError::Network {
            message: e.without_url().to_string(),
        },
        // The base URL is checked at construction, so a bad URL here came
        // from the service (a `next` link or result location).
        ClientError::InvalidUrl(e) => OrdersPortError::InvalidResponse {
            message: format!("invalid URL in response: {e}"),
        },
        ClientError::JsonParse(e) => OrdersPortError::InvalidResponse {
            message: e.to_string(),
        },
        ClientError::Io(e) => OrdersPortError::Io {
            message: e.to_string(),
        },
    }
}

/// Classify a non-success HTTP status.
fn map_status(status: u16, url: &str, body: &str) -> OrdersPortError {
    let message = if body.trim().is_empty() {
        format!("request to {url} failed")
    } else {
        server_message(body)
    };

    match status {
        400 => OrdersPortError::BadQuery {
            message: bad_query_message(body).unwrap_or(message),
        },
        401 | 403 => OrdersPortError::AuthenticationFailed { message },
        404 => OrdersPortError::MissingResource { message },
        409 => OrdersPortError::Conflict { message },
        429 => OrdersPortError::RateLimited { message },
        _ => OrdersPortError::Api { status, message },
    }
}

// ============================================================================
// Input Conversions
// ============================================================================

fn parse_state(state: Option<&str>) -> Result<Option<OrderState>, ValidationError> {
    state.map(str::parse).transpose()
}

fn parse_location(location: &str) -> Result<Url, ValidationError> {
    Url::parse(location).map_err(|e| ValidationError::InvalidLocation {
        value: location.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> OrdersClientPort for OrdersClient<B> {
    fn list_orders(
        &self,
        state: Option<&str>,
        limit: Option<usize>,
    ) -> OrdersPortResult<OrderStream<'_>> {
        let state = parse_state(state)?;
        let orders = self.list_orders(state, limit).map_err(map_error)?;
        Ok(orders.map_err(map_error).boxed())
    }

    async fn create_order(&self, request: &Value) -> OrdersPortResult<Order> {
        self.create_order(request).await.map_err(map_error)
    }

    async fn get_order(&self, order_id: &str) -> OrdersPortResult<Order> {
        let order_id = OrderId::parse(order_id)?;
        self.get_order(&order_id).await.map_err(map_error)
    }

    async fn cancel_order(&self, order_id: &str) -> OrdersPortResult<Order> {
        let order_id = OrderId::parse(order_id)?;
        self.cancel_order(&order_id).await.map_err(map_error)
    }

    async fn cancel_orders(&self, order_ids: &[&str]) -> OrdersPortResult<BulkResult> {
        let order_ids = order_ids
            .iter()
            .map(|id| OrderId::parse(id))
            .collect::<Result<Vec<_>, _>>()?;
        self.cancel_orders(&order_ids).await.map_err(map_error)
    }

    async fn aggregated_order_stats(&self) -> OrdersPortResult<OrderStats> {
        self.aggregated_order_stats().await.map_err(map_error)
    }

    async fn poll(
        &self,
        order_id: &str,
        options: &PollOptions,
        reporter: &dyn StateReporter,
    ) -> OrdersPortResult<OrderState> {
        let order_id = OrderId::parse(order_id)?;
        let target = parse_state(options.state.as_deref())?;
        self.poll(&order_id, target, options.interval, reporter)
            .await
            .map_err(map_error)
    }

    async fn download_asset(
        &self,
        location: &str,
        directory: &Path,
        overwrite: bool,
    ) -> OrdersPortResult<DownloadedFile> {
        let location = parse_location(location)?;
        self.download_asset(&location, directory, overwrite)
            .await
            .map_err(map_error)
    }

    async fn download_order(
        &self,
        order_id: &str,
        directory: &Path,
        overwrite: bool,
    ) -> OrdersPortResult<Vec<DownloadedFile>> {
        let order_id = OrderId::parse(order_id)?;
        self.download_order(&order_id, directory, overwrite)
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{fake_order_json, order_url, test_config, ORDER_ID};
    use crate::http::testing::{CannedResponse, FakeBackend};
    use orbital_core::NoopStateReporter;
    use reqwest::Method;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn client(backend: FakeBackend) -> OrdersClient<FakeBackend> {
        OrdersClient::with_backend(test_config(), backend)
    }

    fn port(client: &OrdersClient<FakeBackend>) -> &dyn OrdersClientPort {
        client
    }

    #[test]
    fn test_map_error_bad_query_joins_messages() {
        let body = json!({
            "field": {"Details": [{"message": "Item ID 4500474_2133707_2021-05-20_2419 / Item Type PSScene3Band doesn't exist"}]},
            "general": [{"message": "Unable to accept order"}]
        })
        .to_string();
        match map_status(400, "http://orders.test/orders/v2/", &body) {
            OrdersPortError::BadQuery { message } => assert_eq!(
                message,
                "Unable to accept order - Item ID 4500474_2133707_2021-05-20_2419 / Item Type PSScene3Band doesn't exist"
            ),
            other => panic!("Expected BadQuery, got {other:?}"),
        }
    }

    #[test]
    fn test_map_error_status_classes() {
        let url = "http://orders.test/x";
        assert!(matches!(
            map_status(401, url, "Unauthorized"),
            OrdersPortError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            map_status(403, url, ""),
            OrdersPortError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            map_status(429, url, "slow down"),
            OrdersPortError::RateLimited { .. }
        ));
        match map_status(502, url, "Bad Gateway") {
            OrdersPortError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_map_error_page_cycle() {
        let err = map_error(ClientError::PageCycle {
            url: "http://orders.test/orders/v2/".to_string(),
        });
        assert!(matches!(err, OrdersPortError::Paging { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_order_keeps_server_message() {
        let message = format!("Could not load order ID: {ORDER_ID}.");
        let backend = FakeBackend::new().with_response(
            Method::GET,
            &order_url(ORDER_ID),
            CannedResponse::error(404, json!({ "message": message.clone() })),
        );
        let client = client(backend);

        let err = port(&client).get_order(ORDER_ID).await.unwrap_err();

        match err {
            OrdersPortError::MissingResource { message: got } => assert_eq!(got, message),
            other => panic!("Expected MissingResource, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_conflict_keeps_server_message() {
        let backend = FakeBackend::new().with_response(
            Method::PUT,
            &order_url(ORDER_ID),
            CannedResponse::error(409, json!("Order not in a cancellable state")),
        );
        let client = client(backend);

        let err = port(&client).cancel_order(ORDER_ID).await.unwrap_err();

        assert_eq!(err.to_string(), "Order not in a cancellable state");
    }

    #[tokio::test]
    async fn test_cancel_missing_order_is_missing_resource() {
        let message = format!("No such order ID: {ORDER_ID}.");
        let backend = FakeBackend::new().with_response(
            Method::PUT,
            &order_url(ORDER_ID),
            CannedResponse::error(404, json!({ "message": message.clone() })),
        );
        let client = client(backend);

        let err = port(&client).cancel_order(ORDER_ID).await.unwrap_err();

        match err {
            OrdersPortError::MissingResource { message: got } => assert_eq!(got, message),
            other => panic!("Expected MissingResource, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_download_hides_signed_query() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(FakeBackend::new());

        let err = port(&client)
            .download_asset("http://dl.test/asset/1?token=s3cr3t", dir.path(), false)
            .await
            .unwrap_err();

        match err {
            OrdersPortError::MissingResource { message } => {
                assert!(message.contains("http://dl.test/asset/1"), "{message}");
                assert!(!message.contains("s3cr3t"), "{message}");
            }
            other => panic!("Expected MissingResource, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_order_bad_query() {
        let backend = FakeBackend::new().with_response(
            Method::POST,
            "http://orders.test/orders/v2/",
            CannedResponse::error(
                400,
                json!({
                    "field": {"Products": [{"message": "Bad item type 'invalid' for bundle type 'analytic'"}]},
                    "general": [{"message": "Unable to accept order"}]
                }),
            ),
        );
        let client = client(backend);

        let err = port(&client)
            .create_order(&json!({"name": "bad"}))
            .await
            .unwrap_err();

        match err {
            OrdersPortError::BadQuery { message } => assert_eq!(
                message,
                "Unable to accept order - Bad item type 'invalid' for bundle type 'analytic'"
            ),
            other => panic!("Expected BadQuery, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_ids_never_reach_network() {
        let client = client(FakeBackend::new());
        let port = port(&client);

        let results = [
            port.get_order("-").await.map(drop),
            port.cancel_order("not-a-uuid").await.map(drop),
            port.cancel_orders(&[ORDER_ID, "-"]).await.map(drop),
            port.poll("-", &PollOptions::new(), &NoopStateReporter)
                .await
                .map(drop),
            port.download_order("-", Path::new("."), false).await.map(drop),
        ];

        for result in results {
            assert!(matches!(
                result,
                Err(OrdersPortError::Validation(ValidationError::InvalidOrderId { .. }))
            ));
        }
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_states_never_reach_network() {
        let client = client(FakeBackend::new());
        let port = port(&client);

        assert!(matches!(
            port.list_orders(Some("done"), None).map(drop),
            Err(OrdersPortError::Validation(ValidationError::UnknownState { .. }))
        ));
        let options = PollOptions::new().with_state("finished");
        assert!(matches!(
            port.poll(ORDER_ID, &options, &NoopStateReporter).await,
            Err(OrdersPortError::Validation(ValidationError::UnknownState { .. }))
        ));
        assert!(client.backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_location_is_validation_error() {
        let client = client(FakeBackend::new());
        let err = port(&client)
            .download_asset("not a url", Path::new("."), false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrdersPortError::Validation(ValidationError::InvalidLocation { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_orders_through_port() {
        let backend = FakeBackend::new().with_json(
            Method::GET,
            "http://orders.test/orders/v2/?state=success",
            json!({
                "_links": {"_self": "http://orders.test/orders/v2/"},
                "orders": [fake_order_json(ORDER_ID, "success")]
            }),
        );
        let client = client(backend);

        let orders: Vec<Order> = port(&client)
            .list_orders(Some("success"), None)
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(orders.len(), 1);
        assert!(orders[0].is_terminal());
    }

    #[tokio::test]
    async fn test_poll_through_port() {
        let backend = FakeBackend::new()
            .with_json(Method::GET, &order_url(ORDER_ID), fake_order_json(ORDER_ID, "running"))
            .with_json(Method::GET, &order_url(ORDER_ID), fake_order_json(ORDER_ID, "success"));
        let client = client(backend);
        let options = PollOptions::new().with_interval(std::time::Duration::ZERO);

        let state = assert_ok!(port(&client).poll(ORDER_ID, &options, &NoopStateReporter).await);

        assert_eq!(state, OrderState::Success);
    }
}
