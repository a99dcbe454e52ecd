//! `reqwest`-backed implementation of [`Transport`].

use std::sync::Arc;

use tracing::{debug, instrument};

use super::{ApiError, RawResponse, Result, Transport};
use crate::config::StorefrontConfig;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the CloudMart commerce API.
///
/// Cheap to clone; every clone shares one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// The base URL every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Read the full body of a response whose status we do not judge.
    async fn into_raw(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "response received");
        Ok(RawResponse { status, body })
    }
}

impl Transport for ApiClient {
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = %status, "non-success status on read");
            return Err(ApiError::Status { status });
        }

        // Read as text first so a decode failure is reported as a parse error
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    #[instrument(skip(self, body), fields(base_url = %self.inner.base_url))]
    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<RawResponse> {
        let request = self.inner.client.post(self.url(path));
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = request.send().await?;
        Self::into_raw(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    async fn delete(&self, path: &str) -> Result<RawResponse> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        Self::into_raw(response).await
    }
}
