//! Integration tests for the order DTOs as consumers see them.

use orbital_core::{
    BulkResult, ChecksumAlgorithm, Order, OrderId, OrderState, OrderStats, PollOptions,
    ValidationError,
};
use serde_json::json;

#[test]
fn test_order_round_trips_unknown_fields() {
    let raw = json!({
        "id": "5ece1dc0-ea81-11eb-837c-acde48001122",
        "name": "coastal clip",
        "state": "partial",
        "last_modified": "2021-07-22T19:02:04.343Z",
        "error_hints": ["one item failed"],
        "tools": [{"clip": {"aoi": {"type": "Polygon"}}}],
        "_links": {
            "_self": "https://api.example.com/compute/ops/orders/v2/5ece1dc0-ea81-11eb-837c-acde48001122",
            "results": [{"location": "https://dl.example.com/1", "name": "x/manifest.json"}]
        }
    });

    let order: Order = serde_json::from_value(raw.clone()).unwrap();

    assert_eq!(order.state, OrderState::Partial);
    assert!(order.is_terminal());
    assert_eq!(order.result_locations(), ["https://dl.example.com/1"]);
    assert_eq!(serde_json::to_value(&order).unwrap(), raw);
}

#[test]
fn test_order_id_accepts_uuid_forms() {
    for id in [
        "5ece1dc0-ea81-11eb-837c-acde48001122",
        "5ece1dc0ea8111eb837cacde48001122",
        "{5ece1dc0-ea81-11eb-837c-acde48001122}",
        "urn:uuid:5ece1dc0-ea81-11eb-837c-acde48001122",
    ] {
        let parsed: OrderId = id.parse().unwrap();
        assert_eq!(parsed.as_str(), id);
    }

    assert_eq!(
        OrderId::parse("-"),
        Err(ValidationError::InvalidOrderId {
            value: "-".to_string()
        })
    );
}

#[test]
fn test_terminal_states() {
    let terminal: Vec<OrderState> = OrderState::ALL
        .into_iter()
        .filter(|state| state.is_terminal())
        .collect();
    assert_eq!(
        terminal,
        [
            OrderState::Success,
            OrderState::Failed,
            OrderState::Partial,
            OrderState::Cancelled
        ]
    );
}

#[test]
fn test_bulk_and_stats_payloads() {
    let bulk: BulkResult = serde_json::from_value(json!({
        "succeeded": {"count": 0},
        "failed": {"count": 0, "failures": []}
    }))
    .unwrap();
    assert_eq!(bulk.total(), 0);
    assert!(!bulk.has_failures());

    let stats: OrderStats = serde_json::from_value(json!({
        "organization": {"queued_orders": 4, "running_orders": 2},
        "user": {"queued_orders": 1, "running_orders": 1}
    }))
    .unwrap();
    assert_eq!(stats.organization.running_orders, 2);
}

#[test]
fn test_checksum_algorithm_and_poll_defaults() {
    assert_eq!(
        "Sha256".parse::<ChecksumAlgorithm>(),
        Ok(ChecksumAlgorithm::Sha256)
    );
    assert!("sha1".parse::<ChecksumAlgorithm>().is_err());

    let options = PollOptions::default();
    assert!(options.state.is_none());
    assert_eq!(options.interval.as_secs(), 5);
}
