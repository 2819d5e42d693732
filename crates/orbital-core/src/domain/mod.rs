//! Domain types for the orders service.
//!
//! These are point-in-time snapshots of server-owned resources. Nothing here
//! performs I/O.

mod bulk;
mod download;
mod order;
mod stats;
mod validation;

pub use bulk::{BulkFailed, BulkFailure, BulkResult, BulkSucceeded};
pub use download::{ChecksumAlgorithm, DownloadedFile};
pub use order::{Order, OrderId, OrderLinks, OrderState, ResultLink};
pub use stats::{OrderCounts, OrderStats};
pub use validation::ValidationError;
