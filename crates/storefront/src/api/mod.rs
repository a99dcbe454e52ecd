//! CloudMart commerce API client.
//!
//! # Architecture
//!
//! - [`Transport`] is the only seam that speaks the wire protocol. The
//!   controllers are generic over it, so tests swap in a scripted fake.
//! - [`ApiClient`] implements it over `reqwest`.
//! - [`endpoints`] holds the typed calls and the path contract.
//! - The server is source of truth: no caching, no retries, no timeout.
//!   Every call is a fresh round trip.
//!
//! # Status handling
//!
//! `get` fails with [`ApiError::Status`] on a non-success status. `post` and
//! `delete` never look at the status; they hand back a [`RawResponse`] and
//! the caller decides what a failure means. Checkout relies on this to tell
//! a structured failure body apart from success.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudmart_storefront::api::{ApiClient, endpoints};
//!
//! let client = ApiClient::new(&config)?;
//! let categories = endpoints::list_categories(&client).await?;
//! let response = endpoints::place_order(&client).await?;
//! if response.is_success() { /* ... */ }
//! ```

mod client;
pub mod endpoints;

use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use client::ApiClient;

/// Errors that can occur when talking to the commerce API.
///
/// `Http` and `Parse` are transport failures: no usable response was
/// obtained. `Status` means a response arrived but reported failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a complete response was read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A response was obtained but its status is outside the success range.
    #[error("Request failed: {status}")]
    Status {
        /// The status the server answered with.
        status: StatusCode,
    },
}

impl ApiError {
    /// Whether no usable response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse(_))
    }

    /// The failing status, for response errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// An undecoded response from a write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Create a raw response.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The three wire primitives the storefront needs.
///
/// Paths are absolute (`/api/v1/...`) and may carry a query string; the
/// implementation resolves them against its base URL.
pub trait Transport {
    /// Read `path` and decode the body as JSON.
    ///
    /// Fails with [`ApiError::Status`] when the status is not a success.
    fn get(&self, path: &str) -> impl Future<Output = Result<serde_json::Value>> + Send;

    /// Post an optional JSON body to `path`. The status is not checked.
    fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<RawResponse>> + Send;

    /// Delete `path`. The status is not checked.
    fn delete(&self, path: &str) -> impl Future<Output = Result<RawResponse>> + Send;
}
