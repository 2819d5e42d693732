//! Port definitions (trait abstractions) for the orders client.
//!
//! Ports define the interfaces consumers program against. Implementations
//! live in adapter crates (`orbital-orders` for the HTTP client); progress
//! sinks are supplied by the caller.

pub mod orders;
mod state_reporter;

pub use orders::{
    OrderStream, OrdersClientPort, OrdersPortError, OrdersPortResult, PollOptions,
};
pub use state_reporter::{NoopStateReporter, StateReporter};
