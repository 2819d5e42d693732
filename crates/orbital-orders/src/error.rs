//! Internal error types for orders operations.
//!
//! These errors are internal to `orbital-orders` and are mapped to
//! `OrdersPortError` at the boundary (see `port.rs`).

use std::path::PathBuf;

use orbital_core::ValidationError;
use thiserror::Error;

/// Result type alias for orders operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors related to orders API operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// API request failed with an HTTP error status.
    #[error("Orders API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Requested URL without query or fragment
        url: String,
        /// Raw response body
        body: String,
    },

    /// A `next` link pointed back to a page that was already fetched.
    #[error("Page cycle detected at {url}")]
    PageCycle {
        /// The repeated URL
        url: String,
    },

    /// The order manifest could not be used for verification.
    #[error("Invalid manifest {}: {message}", .path.display())]
    InvalidManifest {
        /// Path of the manifest
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// Computed digest differs from the manifest.
    #[error("Checksum mismatch for {}", .path.display())]
    ChecksumMismatch {
        /// File that failed verification
        path: PathBuf,
        /// Digest listed in the manifest
        expected: String,
        /// Digest computed from the file
        actual: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
