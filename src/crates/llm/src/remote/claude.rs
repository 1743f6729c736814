//! Anthropic Claude client implementation.
//!
//! Talks to the messages API (`{base_url}/v1/messages`).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::ClaudeClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "ANTHROPIC_API_KEY",
//!     "https://api.anthropic.com",
//!     "claude-3-haiku-20240307"
//! )?;
//! let client = ClaudeClient::new(config)?;
//!
//! let request = ChatRequest::new(vec![Message::human("Hello!")]).with_max_tokens(10);
//! let response = client.chat(request).await?;
//! ```

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::model::{ChatModel, ChatRequest, ChatResponse, Message, MessageRole, UsageMetadata};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The messages API requires `max_tokens`; used when the request leaves it unset.
const DEFAULT_MAX_TOKENS: usize = 1024;

/// Anthropic Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl ClaudeClient {
    /// Create a new Claude client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }

    /// Split messages into Claude's separate system prompt and conversation turns.
    fn convert_messages(&self, messages: &[Message]) -> (Option<String>, Vec<ClaudeMessage>) {
        let mut system_prompt: Option<String> = None;
        let mut claude_messages = Vec::new();

        for msg in messages {
            match msg.role {
                MessageRole::System => {
                    system_prompt = Some(match system_prompt {
                        Some(existing) => format!("{}\n\n{}", existing, msg.text()),
                        None => msg.text().to_string(),
                    });
                }
                MessageRole::Human => claude_messages.push(ClaudeMessage {
                    role: "user".to_string(),
                    content: msg.text().to_string(),
                }),
                MessageRole::Assistant => claude_messages.push(ClaudeMessage {
                    role: "assistant".to_string(),
                    content: msg.text().to_string(),
                }),
            }
        }

        (system_prompt, claude_messages)
    }

    fn build_request(&self, request: &ChatRequest) -> ClaudeRequest {
        let (system, messages) = self.convert_messages(&request.messages);

        ClaudeRequest {
            model: self.config.model.clone(),
            messages,
            system,
            max_tokens: request.config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.config.temperature,
            stop_sequences: if request.config.stop_sequences.is_empty() {
                None
            } else {
                Some(request.config.stop_sequences.clone())
            },
            stream: false,
        }
    }

    /// Convert Claude response to ChatResponse.
    fn convert_response(&self, claude_resp: ClaudeResponse) -> ChatResponse {
        let content_text = claude_resp
            .content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        let usage = Some(UsageMetadata::new(
            claude_resp.usage.input_tokens,
            claude_resp.usage.output_tokens,
        ));

        let mut metadata = HashMap::new();
        metadata.insert("id".to_string(), serde_json::Value::String(claude_resp.id));
        metadata.insert(
            "model".to_string(),
            serde_json::Value::String(claude_resp.model),
        );
        metadata.insert(
            "stop_reason".to_string(),
            serde_json::Value::String(claude_resp.stop_reason.unwrap_or_default()),
        );

        ChatResponse {
            message: Message::assistant(content_text),
            usage,
            metadata,
        }
    }
}

#[async_trait]
impl ChatModel for ClaudeClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/v1/messages", self.config.base_url);
        let req_body = self.build_request(&request);

        debug!(model = %self.config.model, "Sending Claude messages request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&req_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status("Claude", status, error_text, &[401]));
        }

        let claude_resp: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(self.convert_response(claude_resp))
    }

    fn provider(&self) -> &str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// Claude API types
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    messages: Vec<ClaudeMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    id: String,
    content: Vec<ClaudeContent>,
    model: String,
    stop_reason: Option<String>,
    usage: ClaudeUsage,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    input_tokens: usize,
    output_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> ClaudeClient {
        let config = RemoteLlmConfig::new("test-key", base_url, "claude-3-haiku-20240307");
        ClaudeClient::new(config).unwrap()
    }

    #[test]
    fn test_message_conversion() {
        let client = client_for("https://api.anthropic.com");

        let messages = vec![Message::system("You are helpful"), Message::human("Hello")];
        let (system, claude_msgs) = client.convert_messages(&messages);

        assert_eq!(system, Some("You are helpful".to_string()));
        assert_eq!(claude_msgs.len(), 1);
        assert_eq!(claude_msgs[0].role, "user");
        assert_eq!(claude_msgs[0].content, "Hello");
    }

    #[test]
    fn test_max_tokens_default() {
        let client = client_for("https://api.anthropic.com");
        let request = client.build_request(&ChatRequest::new(vec![Message::human("Hi")]));
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({ "max_tokens": 10, "temperature": 0.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": "FAQ" }],
                "model": "claude-3-haiku-20240307",
                "stop_reason": "end_turn",
                "stop_sequence": null,
                "usage": { "input_tokens": 60, "output_tokens": 2 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let request = ChatRequest::new(vec![Message::human("store hours?")])
            .with_temperature(0.0)
            .with_max_tokens(10);
        let response = client.chat(request).await.unwrap();

        assert_eq!(response.text(), "FAQ");
        assert_eq!(response.usage, Some(UsageMetadata::new(60, 2)));
        assert_eq!(response.metadata["stop_reason"], "end_turn");
    }

    #[tokio::test]
    async fn test_chat_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(429).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .chat(ChatRequest::new(vec![Message::human("hi")]))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::RateLimitExceeded(_)));
    }
}
