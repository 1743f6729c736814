//! Error types for LLM provider implementations.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when working with LLM providers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// API key not found in environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid response from provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// General provider error.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Check if this error is due to authentication or missing credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_) | LlmError::ApiKeyNotFound(_)
        )
    }

    /// Check if this error was raised before any request left the process.
    pub fn is_config_error(&self) -> bool {
        matches!(self, LlmError::ApiKeyNotFound(_) | LlmError::ConfigError(_))
    }

    /// Map a non-success HTTP status and body to the matching error variant.
    ///
    /// `auth_statuses` lists the codes the provider uses for bad credentials.
    pub(crate) fn from_status(
        provider: &str,
        status: reqwest::StatusCode,
        body: String,
        auth_statuses: &[u16],
    ) -> Self {
        let code = status.as_u16();
        if auth_statuses.contains(&code) {
            LlmError::AuthenticationError(body)
        } else if code == 429 {
            LlmError::RateLimitExceeded(body)
        } else {
            LlmError::ProviderError(format!("{} API error {}: {}", provider, status, body))
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}
