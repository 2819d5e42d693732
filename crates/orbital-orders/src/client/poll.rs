//! Order state polling.

use std::time::Duration;

use orbital_core::{OrderId, OrderState, StateReporter};
use tracing::debug;

use super::OrdersClient;
use crate::error::ClientResult;
use crate::http::HttpBackend;

/// Progress of one polling run.
#[derive(Debug)]
struct PollState {
    order_id: OrderId,
    last: Option<OrderState>,
    fetches: u32,
}

impl PollState {
    const fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            last: None,
            fetches: 0,
        }
    }

    /// Record a sampled state. Returns true if it differs from the previous one.
    fn observe(&mut self, state: OrderState) -> bool {
        self.fetches += 1;
        let changed = self.last != Some(state);
        self.last = Some(state);
        changed
    }
}

/// Terminal states end polling even when a different target was requested.
fn should_stop(state: OrderState, target: Option<OrderState>) -> bool {
    target == Some(state) || state.is_terminal()
}

impl<B: HttpBackend> OrdersClient<B> {
    /// Poll until the order reaches `target` or a terminal state.
    pub(crate) async fn poll(
        &self,
        order_id: &OrderId,
        target: Option<OrderState>,
        interval: Duration,
        reporter: &dyn StateReporter,
    ) -> ClientResult<OrderState> {
        let mut progress = PollState::new(order_id.clone());

        loop {
            let state = self.get_order(order_id).await?.state;
            if progress.observe(state) {
                reporter.report(&progress.order_id, state);
            }
            debug!(
                order_id = %progress.order_id,
                state = %state,
                fetches = progress.fetches,
                "Polled order state"
            );

            if should_stop(state, target) {
                return Ok(state);
            }
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }
    }
}
