//! Bulk operation results.

use serde::{Deserialize, Serialize};

/// Summary of a bulk cancellation as reported by the service.
///
/// Per-order failures are data, not errors: inspect `failed.failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    pub succeeded: BulkSucceeded,
    pub failed: BulkFailed,
}

/// Orders the service acted on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSucceeded {
    pub count: u64,
}

/// Orders the service could not act on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailed {
    pub count: u64,
    #[serde(default)]
    pub failures: Vec<BulkFailure>,
}

/// A single rejected order within a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub order_id: String,
    pub message: String,
}

impl BulkResult {
    /// Whether any order in the request was rejected.
    pub const fn has_failures(&self) -> bool {
        self.failed.count > 0
    }

    /// Number of orders the service considered.
    pub const fn total(&self) -> u64 {
        self.succeeded.count + self.failed.count
    }
}
