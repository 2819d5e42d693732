//! Aggregated order statistics.

use serde::{Deserialize, Serialize};

/// Order counts for the caller and their organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub organization: OrderCounts,
    #[serde(default)]
    pub user: OrderCounts,
}

/// Orders waiting for or undergoing processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCounts {
    #[serde(default)]
    pub queued_orders: u64,
    #[serde(default)]
    pub running_orders: u64,
}
