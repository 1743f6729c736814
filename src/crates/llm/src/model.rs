//! The provider-agnostic chat contract.
//!
//! Callers build a [`ChatRequest`] from a list of [`Message`]s, hand it to any
//! [`ChatModel`], and read the reply from [`ChatResponse::text`]. Clients own
//! the conversion to their vendor's wire format.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Core trait for chat-based language models.
///
/// Implementations must be `Send + Sync`; share them as `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete chat response from messages.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Provider name used in logs and error messages.
    fn provider(&self) -> &str;

    /// Model identifier this client sends requests to.
    fn model(&self) -> &str;
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions for the model.
    System,
    /// End-user input.
    Human,
    /// Model output.
    Assistant,
}

/// A single text message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a human message
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn text(&self) -> &str {
        &self.content
    }
}

/// A request to a chat model containing messages and configuration.
///
/// ```rust,ignore
/// let request = ChatRequest::new(vec![Message::human("Classify this")])
///     .with_temperature(0.0)
///     .with_max_tokens(10);
/// ```
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Generation parameters.
    pub config: ChatConfig,
}

impl ChatRequest {
    /// Create a new chat request with default configuration.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            config: ChatConfig::default(),
        }
    }

    /// Set the sampling temperature. `0.0` pins decoding to the most likely token.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// Add stop sequences that halt generation.
    pub fn with_stop_sequences(mut self, sequences: Vec<String>) -> Self {
        self.config.stop_sequences = sequences;
        self
    }
}

/// Configuration parameters for chat generation.
///
/// Unset fields are omitted from the wire request so the provider default
/// applies.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub stop_sequences: Vec<String>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

impl UsageMetadata {
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// A complete reply from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant message.
    pub message: Message,

    /// Token usage, when the provider reports it.
    pub usage: Option<UsageMetadata>,

    /// Provider-specific details (model, finish reason, ...).
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ChatResponse {
    /// Wrap plain assistant text with no usage or metadata.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(text),
            usage: None,
            metadata: HashMap::new(),
        }
    }

    /// The assistant's reply text.
    pub fn text(&self) -> &str {
        self.message.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_builder() {
        let request = ChatRequest::new(vec![Message::human("test")])
            .with_temperature(0.0)
            .with_max_tokens(10)
            .with_stop_sequences(vec!["\n".to_string()]);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::Human);
        assert_eq!(request.config.temperature, Some(0.0));
        assert_eq!(request.config.max_tokens, Some(10));
        assert_eq!(request.config.stop_sequences, vec!["\n".to_string()]);
    }

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert!(config.temperature.is_none());
        assert!(config.max_tokens.is_none());
        assert!(config.stop_sequences.is_empty());
    }

    #[test]
    fn test_usage_totals() {
        let usage = UsageMetadata::new(12, 3);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn test_response_text() {
        let response = ChatResponse::from_text("FAQ");
        assert_eq!(response.text(), "FAQ");
        assert_eq!(response.message.role, MessageRole::Assistant);
    }
}
