//! Google Gemini client implementation.
//!
//! Provides integration with Google's Gemini models via the Gemini API
//! (`{base_url}/models/{model}:generateContent`).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::GeminiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "GOOGLE_API_KEY",
//!     "https://generativelanguage.googleapis.com/v1beta",
//!     "gemini-2.0-flash"
//! )?;
//! let client = GeminiClient::new(config)?;
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

/// Google Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self { config, client })
    }

    /// Convert messages to Gemini format.
    ///
    /// Gemini has no system role in `contents`; system text is prepended as a
    /// user turn.
    fn convert_messages(&self, messages: &[Message]) -> Vec<GeminiMessage> {
        let mut gemini_messages = Vec::new();
        let mut system_instruction: Option<String> = None;

        for msg in messages {
            match msg.role {
                MessageRole::System => {
                    system_instruction = Some(match system_instruction {
                        Some(existing) => format!("{}\n\n{}", existing, msg.text()),
                        None => msg.text().to_string(),
                    });
                }
                MessageRole::Human => gemini_messages.push(GeminiMessage::new("user", msg.text())),
                MessageRole::Assistant => {
                    gemini_messages.push(GeminiMessage::new("model", msg.text()))
                }
            }
        }

        if let Some(instruction) = system_instruction {
            gemini_messages.insert(
                0,
                GeminiMessage::new("user", format!("[System] {}", instruction)),
            );
        }

        gemini_messages
    }

    fn build_request(&self, request: &ChatRequest) -> GeminiRequest {
        GeminiRequest {
            contents: self.convert_messages(&request.messages),
            generation_config: Some(GeminiGenerationConfig {
                temperature: request.config.temperature,
                max_output_tokens: request.config.max_tokens,
                stop_sequences: if request.config.stop_sequences.is_empty() {
                    None
                } else {
                    Some(request.config.stop_sequences.clone())
                },
            }),
        }
    }

    /// Convert Gemini response to ChatResponse.
    fn convert_response(&self, gemini_resp: GeminiResponse) -> Result<ChatResponse> {
        let candidate = gemini_resp.candidates.into_iter().next().ok_or_else(|| {
            LlmError::InvalidResponse("Gemini returned no candidates".to_string())
        })?;

        let content_text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = gemini_resp
            .usage_metadata
            .map(|u| UsageMetadata::new(u.prompt_token_count, u.candidates_token_count));

        let mut metadata = HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::Value::String(self.config.model.clone()),
        );
        if let Some(finish_reason) = candidate.finish_reason {
            metadata.insert(
                "finish_reason".to_string(),
                serde_json::Value::String(finish_reason),
            );
        }

        Ok(ChatResponse {
            message: Message::assistant(content_text),
            usage,
            metadata,
        })
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let req_body = self.build_request(&request);

        debug!(model = %self.config.model, "Sending Gemini generateContent request");

        // Gemini takes the API key as a query parameter
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .json(&req_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status("Gemini", status, error_text, &[401, 403]));
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        self.convert_response(gemini_resp)
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiMessage {
    role: String,
    parts: Vec<GeminiPart>,
}

impl GeminiMessage {
    fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}
