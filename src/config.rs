//! Stay AI API configuration.

use url::Url;

use crate::error::{McpError, Result};

/// Default base URL of the Stay AI REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.stay.ai/v1";

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "STAY_AI_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "STAY_AI_BASE_URL";

/// Credential sent when no API key is configured. The remote API rejects it.
pub const MISSING_API_KEY: &str = "missing_api_key";

/// Configuration for the Stay AI gateway client.
#[derive(Debug, Clone)]
pub struct StayConfig {
    /// Base URL every request path is appended to.
    pub base_url: Url,
    /// Bearer token (or [`MISSING_API_KEY`]).
    pub api_key: String,
}

impl StayConfig {
    /// Build a configuration from a base URL and an optional API key.
    ///
    /// A missing or blank key falls back to [`MISSING_API_KEY`].
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| McpError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(McpError::Config(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| MISSING_API_KEY.to_string());

        Ok(Self { base_url, api_key })
    }

    /// Read [`API_KEY_ENV`] and [`BASE_URL_ENV`] from the process environment.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url, std::env::var(API_KEY_ENV).ok())
    }

    /// Whether a real API key was configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key != MISSING_API_KEY
    }
}
