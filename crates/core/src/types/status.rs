//! Status enums for server-side entities.

use serde::{Deserialize, Serialize};

/// Order status as reported by the commerce API.
///
/// The client never transitions an order; it only displays what the server
/// returned. Values this client does not know about decode to
/// [`OrderStatus::Unknown`] instead of failing the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Unknown => "unknown",
        }
    }
}
