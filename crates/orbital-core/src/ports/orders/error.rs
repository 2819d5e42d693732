//! Error types for orders port operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ValidationError;

/// Errors from orders port operations.
///
/// Implementation-specific errors (HTTP, JSON, I/O) are mapped to these
/// exactly once, at the client boundary. A bulk cancellation in which some
/// orders were rejected is not an error; see `BulkResult::failed`.
#[derive(Debug, Error)]
pub enum OrdersPortError {
    /// Input was rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service rejected the request body.
    #[error("Bad query: {message}")]
    BadQuery {
        /// General and field-level messages, joined
        message: String,
    },

    /// Credentials were missing, invalid, or lack permission.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Server message, verbatim
        message: String,
    },

    /// The order (or other resource) does not exist.
    #[error("{message}")]
    MissingResource {
        /// Server message, verbatim
        message: String,
    },

    /// The request conflicts with the resource state, e.g. cancelling a
    /// finished order.
    #[error("{message}")]
    Conflict {
        /// Server message, verbatim
        message: String,
    },

    /// Too many requests.
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        /// Server message, verbatim
        message: String,
    },

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server message, verbatim
        message: String,
    },

    /// Following `next` links failed, e.g. the service returned a page cycle.
    #[error("Paging error: {message}")]
    Paging {
        /// What went wrong
        message: String,
    },

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The service answered with something that could not be decoded.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Local file system error while writing or reading results.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A downloaded file does not match the digest in the order manifest.
    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        /// File that failed verification
        path: PathBuf,
        /// Digest listed in the manifest
        expected: String,
        /// Digest computed from the file
        actual: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for orders port operations.
pub type OrdersPortResult<T> = Result<T, OrdersPortError>;
