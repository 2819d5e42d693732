//! Orders client port definitions.
//!
//! This module defines the port trait and DTOs for order lifecycle
//! operations. The actual implementation lives in `orbital-orders`.

mod client;
mod error;
mod types;

pub use client::{OrderStream, OrdersClientPort};
pub use error::{OrdersPortError, OrdersPortResult};
pub use types::PollOptions;
