#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultOrdersClient is used through OrdersClientPort, not through its
// generic backend parameter
#![allow(private_interfaces)]

mod checksum;
mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultOrdersClient;

// Configuration
pub use config::{API_KEY_ENV, BASE_URL_ENV, OrdersClientConfig};

// Result verification
pub use checksum::{MANIFEST_FILE, validate_checksum};
