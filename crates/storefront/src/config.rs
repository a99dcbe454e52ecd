//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CLOUDMART_API_BASE_URL` - Commerce API base URL (default: <http://127.0.0.1:8000>)
//! - `CLOUDMART_USER_AGENT` - `User-Agent` sent with every request
//!   (default: `cloudmart-storefront/<version>`)

use thiserror::Error;
use url::Url;

/// Default commerce API location (the backend's development port).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

const API_BASE_URL_VAR: &str = "CLOUDMART_API_BASE_URL";
const USER_AGENT_VAR: &str = "CLOUDMART_USER_AGENT";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL every API path is resolved against
    pub api_base_url: Url,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            API_BASE_URL_VAR,
            &get_env_or_default(API_BASE_URL_VAR, DEFAULT_API_BASE_URL),
        )?;
        let user_agent = get_optional_env(USER_AGENT_VAR).unwrap_or_else(default_user_agent);

        Ok(Self {
            api_base_url,
            user_agent,
        })
    }

    /// Configuration pointing at `base_url` with default settings otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(API_BASE_URL_VAR, base_url)?,
            user_agent: default_user_agent(),
        })
    }

    /// Replace the base URL, keeping the other settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn override_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_base_url(API_BASE_URL_VAR, base_url)?;
        Ok(self)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base URL is valid")),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Parse and validate an API base URL.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "base URL must not carry a query or fragment".to_string(),
        ));
    }

    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_accepts_http() {
        let url = parse_base_url("TEST_VAR", "http://localhost:8000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("TEST_VAR", "ftp://shop.test").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_parse_base_url_rejects_query() {
        assert!(parse_base_url("TEST_VAR", "http://shop.test/?a=1").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:8000/");
        assert!(config.user_agent.starts_with("cloudmart-storefront/"));
    }

    #[test]
    fn test_override_base_url() {
        let config = StorefrontConfig::default()
            .override_base_url("https://api.cloudmart.test")
            .unwrap();
        assert_eq!(config.api_base_url.host_str(), Some("api.cloudmart.test"));
    }
}
