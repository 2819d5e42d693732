//! Order snapshot types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::validation::ValidationError;

// ============================================================================
// Order ID
// ============================================================================

/// A validated order identifier.
///
/// The service issues UUIDs. Any form accepted by [`Uuid::parse_str`]
/// (hyphenated, simple, braced, URN) is valid; the original text is kept
/// so requests use exactly what the caller passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Validate and wrap an order identifier.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(value)
            .map(|_| Self(value.to_string()))
            .map_err(|_| ValidationError::InvalidOrderId {
                value: value.to_string(),
            })
    }

    /// The identifier as passed by the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Order State
// ============================================================================

/// Processing state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Queued,
    Running,
    Success,
    Failed,
    Partial,
    Cancelled,
}

impl OrderState {
    /// Every state, in the order the service documents them.
    pub const ALL: [Self; 6] = [
        Self::Queued,
        Self::Running,
        Self::Success,
        Self::Failed,
        Self::Partial,
        Self::Cancelled,
    ];

    /// Wire name of the state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Partial => "partial",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the service will never move the order out of this state.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::Partial | Self::Cancelled
        )
    }
}

impl FromStr for OrderState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownState {
                value: s.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|state| state.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order
// ============================================================================

/// A single result produced by a completed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLink {
    /// Signed download URL; any access token is already in the query string
    pub location: String,
    /// File name the service associates with the result, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remaining server-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `_links` section of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLinks {
    /// Canonical URL of the order
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Downloadable results; empty until the order produces output
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultLink>,
    /// Remaining server-defined links
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Point-in-time snapshot of an order.
///
/// Fields the client does not interpret are kept in `extra` and written
/// back unchanged when the order is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier as returned by the service
    pub id: String,
    /// Current processing state
    pub state: OrderState,
    /// Caller-supplied order name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Submission time, as the service formatted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Time of the last state change, as the service formatted it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Links to the order itself and its results
    #[serde(rename = "_links", default)]
    pub links: OrderLinks,
    /// Remaining server-defined fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Download locations of all results, in the order the service lists them.
    pub fn result_locations(&self) -> Vec<&str> {
        self.links
            .results
            .iter()
            .map(|result| result.location.as_str())
            .collect()
    }

    /// Whether the order has reached a terminal state.
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Submission time, if present and in RFC 3339 form.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_on.as_deref().and_then(parse_timestamp)
    }

    /// Last state change time, if present and in RFC 3339 form.
    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_timestamp)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}
