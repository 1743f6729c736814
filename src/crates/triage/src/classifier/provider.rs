//! Hosted model bindings used as intent classifiers.

use super::{ClassifierError, LlmIntentClassifier, NamedClassifier};
use llm::remote::{ClaudeClient, GeminiClient, OpenAiClient};
use llm::{ChatModel, RemoteLlmConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Which vendor API a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Claude,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Gemini => "gemini-2.0-flash",
            ProviderKind::Claude => "claude-3-haiku-20240307",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
            ProviderKind::Claude => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::Claude => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "claude" => Ok(ProviderKind::Claude),
            other => Err(format!(
                "Unknown provider kind '{}' (expected openai, gemini or claude)",
                other
            )),
        }
    }
}

/// One named hosted model.
///
/// Unset optional fields fall back to the defaults of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name, e.g. `GPT`
    pub name: String,

    /// Vendor API
    pub kind: ProviderKind,

    /// Model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            kind,
            model: None,
            api_key_env: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The built-in GPT, Gemini and Claude bindings, in that order.
    pub fn defaults() -> Vec<ProviderConfig> {
        vec![
            ProviderConfig::new("GPT", ProviderKind::OpenAi),
            ProviderConfig::new("Gemini", ProviderKind::Gemini),
            ProviderConfig::new("Claude", ProviderKind::Claude),
        ]
    }

    pub fn resolved_model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.kind.default_model())
    }

    pub fn resolved_api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or(self.kind.default_api_key_env())
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(self.kind.default_base_url())
    }

    /// Build the chat client for this provider.
    ///
    /// The API key is read from the environment here, so a missing key is a
    /// [`ClassifierError::Config`] before any request is made.
    pub fn connect(&self) -> Result<Arc<dyn ChatModel>, ClassifierError> {
        let config = RemoteLlmConfig::from_env(
            self.resolved_api_key_env(),
            self.resolved_base_url(),
            self.resolved_model(),
        )
        .map_err(|e| ClassifierError::Config(format!("{}: {}", self.name, e)))?
        .with_timeout(Duration::from_secs(self.timeout_secs));

        debug!(
            provider = %self.name,
            kind = %self.kind,
            model = %config.model,
            base_url = %config.base_url,
            "Connecting provider"
        );

        let model: Arc<dyn ChatModel> = match self.kind {
            ProviderKind::OpenAi => Arc::new(OpenAiClient::new(config)?),
            ProviderKind::Gemini => Arc::new(GeminiClient::new(config)?),
            ProviderKind::Claude => Arc::new(ClaudeClient::new(config)?),
        };

        Ok(model)
    }

    /// Connect and wrap the client as a named intent classifier.
    pub fn classifier(&self) -> Result<NamedClassifier, ClassifierError> {
        let model = self.connect()?;
        Ok(NamedClassifier::new(
            self.name.clone(),
            Arc::new(LlmIntentClassifier::new(model)),
        ))
    }
}
