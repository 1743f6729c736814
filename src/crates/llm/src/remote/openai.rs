//! OpenAI client implementation.
//!
//! Talks to the chat completions endpoint (`{base_url}/chat/completions`).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "OPENAI_API_KEY",
//!     "https://api.openai.com/v1",
//!     "gpt-4o-mini"
//! )?;
//! let client = OpenAiClient::new(config)?;
//!
//! let request = ChatRequest::new(vec![Message::human("Hello!")]);
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

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAiClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }

    /// Convert a message to OpenAI message format.
    fn convert_message(&self, msg: &Message) -> OpenAiMessage {
        OpenAiMessage {
            role: match msg.role {
                MessageRole::System => "system",
                MessageRole::Human => "user",
                MessageRole::Assistant => "assistant",
            }
            .to_string(),
            content: Some(msg.text().to_string()),
        }
    }

    fn build_request(&self, request: &ChatRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: self.config.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| self.convert_message(m))
                .collect(),
            temperature: request.config.temperature,
            max_tokens: request.config.max_tokens,
            stop: if request.config.stop_sequences.is_empty() {
                None
            } else {
                Some(request.config.stop_sequences.clone())
            },
            stream: false,
        }
    }

    /// Convert OpenAI response to ChatResponse.
    fn convert_response(&self, openai_resp: OpenAiResponse) -> Result<ChatResponse> {
        let choice = openai_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("OpenAI returned no choices".to_string()))?;

        let usage = openai_resp
            .usage
            .map(|u| UsageMetadata::new(u.prompt_tokens, u.completion_tokens));

        let mut metadata = HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::Value::String(openai_resp.model),
        );
        metadata.insert(
            "finish_reason".to_string(),
            serde_json::Value::String(choice.finish_reason.unwrap_or_default()),
        );

        Ok(ChatResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            usage,
            metadata,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let req_body = self.build_request(&request);

        debug!(model = %self.config.model, "Sending OpenAI chat completion request");

        let mut req = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&req_body);

        if let Some(org) = &self.config.organization {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status("OpenAI", status, error_text, &[401]));
        }

        let openai_resp: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        self.convert_response(openai_resp)
    }

    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}
