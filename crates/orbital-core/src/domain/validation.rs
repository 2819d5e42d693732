//! Local validation errors.

use thiserror::Error;

/// Input rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order identifier is not UUID-shaped.
    #[error("Invalid order ID: '{value}'")]
    InvalidOrderId {
        /// The rejected identifier
        value: String,
    },

    /// The state is not one of the known order states.
    #[error("Invalid order state: '{value}' (expected one of: {expected})")]
    UnknownState {
        /// The rejected state
        value: String,
        /// Comma separated list of valid states
        expected: String,
    },

    /// The checksum algorithm is not supported.
    #[error("Invalid checksum algorithm: '{value}' (expected MD5 or SHA256)")]
    UnknownChecksum {
        /// The rejected algorithm name
        value: String,
    },

    /// A download location is not an absolute URL.
    #[error("Invalid download location: '{value}' ({reason})")]
    InvalidLocation {
        /// The rejected location
        value: String,
        /// Why it could not be parsed
        reason: String,
    },
}
