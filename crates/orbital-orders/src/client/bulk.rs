//! Bulk order cancellation.

use orbital_core::{BulkResult, OrderId};
use reqwest::Method;
use tracing::{info, warn};

use super::OrdersClient;
use crate::error::ClientResult;
use crate::http::HttpBackend;
use crate::models::{BulkCancelRequest, BulkCancelResponse};
use crate::url::build_bulk_cancel_url;

impl<B: HttpBackend> OrdersClient<B> {
    /// Cancel the given orders, or every cancellable order if none are given.
    ///
    /// Orders the service refused are reported in `BulkResult::failed`.
    pub(crate) async fn cancel_orders(&self, order_ids: &[OrderId]) -> ClientResult<BulkResult> {
        let url = build_bulk_cancel_url(&self.config)?;
        let request = BulkCancelRequest {
            order_ids: order_ids.iter().map(OrderId::as_str).collect(),
        };
        let body = serde_json::to_value(&request)?;

        let response: BulkCancelResponse = self
            .backend
            .request_json(Method::POST, &url, Some(&body))
            .await?;
        let result = response.result;

        if result.has_failures() {
            warn!(
                succeeded = result.succeeded.count,
                failed = result.failed.count,
                "Bulk cancellation partially failed"
            );
        } else {
            info!(succeeded = result.succeeded.count, "Bulk cancellation complete");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{order_id, test_config, ORDER_ID};
    use super::*;
    use crate::error::ClientError;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::{json, Value};

    const BULK_URL: &str = "http://orders.test/bulk/orders/v2/cancel";
    const OTHER_ID: &str = "dc4f9b59-6b4f-4a0d-9e5c-7dd2a0a6f2a5";

    fn bulk_response(succeeded: u64, failures: &[(&str, &str)]) -> Value {
        let failures: Vec<Value> = failures
            .iter()
            .map(|(id, message)| json!({"order_id": id, "message": message}))
            .collect();
        json!({
            "result": {
                "succeeded": {"count": succeeded},
                "failed": {"count": failures.len(), "failures": failures}
            }
        })
    }

    #[tokio::test]
    async fn test_cancel_listed_orders() {
        let backend =
            FakeBackend::new().with_json(Method::POST, BULK_URL, bulk_response(2, &[]));
        let client = OrdersClient::with_backend(test_config(), backend);
        let other = OrderId::parse(OTHER_ID).unwrap();

        let result = client.cancel_orders(&[order_id(), other]).await.unwrap();

        assert_eq!(result.succeeded.count, 2);
        assert!(!result.has_failures());
        assert_eq!(
            client.backend.requests()[0].body,
            Some(json!({"order_ids": [ORDER_ID, OTHER_ID]}))
        );
    }

    #[tokio::test]
    async fn test_cancel_all_sends_empty_object() {
        let backend =
            FakeBackend::new().with_json(Method::POST, BULK_URL, bulk_response(5, &[]));
        let client = OrdersClient::with_backend(test_config(), backend);

        let result = client.cancel_orders(&[]).await.unwrap();

        assert_eq!(result.total(), 5);
        assert_eq!(client.backend.requests()[0].body, Some(json!({})));
    }

    #[tokio::test]
    async fn test_partial_failure_is_data() {
        let backend = FakeBackend::new().with_json(
            Method::POST,
            BULK_URL,
            bulk_response(1, &[(OTHER_ID, "Order not in a cancellable state")]),
        );
        let client = OrdersClient::with_backend(test_config(), backend);
        let other = OrderId::parse(OTHER_ID).unwrap();

        let result = client.cancel_orders(&[order_id(), other]).await.unwrap();

        assert!(result.has_failures());
        assert_eq!(result.failed.count, 1);
        assert_eq!(result.failed.failures[0].order_id, OTHER_ID);
        assert_eq!(
            result.failed.failures[0].message,
            "Order not in a cancellable state"
        );
    }

    #[tokio::test]
    async fn test_top_level_failure_is_error() {
        let backend = FakeBackend::new().with_response(
            Method::POST,
            BULK_URL,
            CannedResponse::error(500, json!({"message": "internal error"})),
        );
        let client = OrdersClient::with_backend(test_config(), backend);

        let err = client.cancel_orders(&[order_id()]).await.unwrap_err();

        assert!(matches!(err, ClientError::ApiRequestFailed { status: 500, .. }));
    }
}
