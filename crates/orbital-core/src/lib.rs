#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    BulkFailed, BulkFailure, BulkResult, BulkSucceeded, ChecksumAlgorithm, DownloadedFile, Order,
    OrderCounts, OrderId, OrderLinks, OrderState, OrderStats, ResultLink, ValidationError,
};
pub use ports::{
    NoopStateReporter, OrderStream, OrdersClientPort, OrdersPortError, OrdersPortResult,
    PollOptions, StateReporter,
};
