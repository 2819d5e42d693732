//! Core-owned DTOs for orders port operations.

use std::time::Duration;

/// Default wait between two polls of the same order.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Options for polling an order's state.
///
/// # Example
///
/// ```
/// use orbital_core::PollOptions;
/// use std::time::Duration;
///
/// let options = PollOptions::new()
///     .with_state("running")
///     .with_interval(Duration::ZERO);
/// assert_eq!(options.state.as_deref(), Some("running"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// State to wait for. `None` waits for any terminal state.
    ///
    /// Validated against the known states before the first request.
    pub state: Option<String>,
    /// Wait between polls. Zero disables waiting.
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            state: None,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollOptions {
    /// Create options that wait for a terminal state every 5 seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop polling once the order reaches this state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the wait between polls.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
