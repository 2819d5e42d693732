//! Progress sink for order state polling.
//!
//! The poller calls the reporter synchronously each time it observes a new
//! state. Rendering (progress bars, log lines, UI events) is the caller's
//! concern; the caller also owns the reporter's lifetime.

use crate::domain::{OrderId, OrderState};

/// Receives order state transitions observed while polling.
///
/// Any `Fn(&OrderId, OrderState) + Send + Sync` closure is a reporter.
///
/// # Example
///
/// ```
/// use orbital_core::{OrderId, OrderState, StateReporter};
///
/// let reporter = |id: &OrderId, state: OrderState| println!("{id}: {state}");
/// let id = OrderId::parse("5ece1dc0-ea81-11eb-837c-acde48001122").unwrap();
/// reporter.report(&id, OrderState::Running);
/// ```
pub trait StateReporter: Send + Sync {
    /// Called once per distinct observed state, in observation order.
    fn report(&self, order_id: &OrderId, state: OrderState);
}

impl<F> StateReporter for F
where
    F: Fn(&OrderId, OrderState) + Send + Sync,
{
    fn report(&self, order_id: &OrderId, state: OrderState) {
        self(order_id, state);
    }
}

/// A reporter that discards every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStateReporter;

impl StateReporter for NoopStateReporter {
    fn report(&self, _order_id: &OrderId, _state: OrderState) {}
}
