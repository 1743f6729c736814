//! Connection settings shared by the remote LLM clients.

use crate::error::{LlmError, Result};
use std::fmt;
use std::time::Duration;

/// Configuration for remote LLM providers (OpenAI, Gemini, Anthropic).
#[derive(Clone)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    ///
    /// Examples:
    /// - OpenAI: "https://api.openai.com/v1"
    /// - Gemini: "https://generativelanguage.googleapis.com/v1beta"
    /// - Anthropic: "https://api.anthropic.com"
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Request timeout duration.
    pub timeout: Duration,

    /// Organization ID (optional, OpenAI only).
    pub organization: Option<String>,
}

impl RemoteLlmConfig {
    /// Create a new remote LLM configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: default_timeout(),
            organization: None,
        }
    }

    /// Create configuration with the API key read from an environment variable.
    ///
    /// A missing or blank variable is reported as [`LlmError::ApiKeyNotFound`]
    /// so callers can fail before any network call is attempted.
    pub fn from_env(
        env_var: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::ApiKeyNotFound(format!("{} not set in environment", env_var)))?;

        Ok(Self::new(api_key, base_url, model))
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the organization ID.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Build the HTTP client used by every provider.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

impl fmt::Debug for RemoteLlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteLlmConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("organization", &self.organization)
            .finish()
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
