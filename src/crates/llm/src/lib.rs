//! Hosted LLM provider clients for triage.
//!
//! This crate defines the [`ChatModel`] trait used by the router's intent
//! classifier and implements it for three cloud-hosted APIs:
//! - **OpenAI** - chat completions (`gpt-4o-mini` and friends)
//! - **Gemini** - Google's `generateContent` endpoint
//! - **Claude** - Anthropic's messages API
//!
//! Every client issues exactly one HTTP request per [`ChatModel::chat`] call.
//! There is no retry layer; failures surface as [`LlmError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::{ChatModel, ChatRequest, Message, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env(
//!         "OPENAI_API_KEY",
//!         "https://api.openai.com/v1",
//!         "gpt-4o-mini",
//!     )?;
//!     let client = OpenAiClient::new(config)?;
//!
//!     let request = ChatRequest::new(vec![Message::human("Say FAQ")])
//!         .with_temperature(0.0)
//!         .with_max_tokens(10);
//!
//!     let response = client.chat(request).await?;
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;

#[cfg(feature = "remote")]
pub mod remote;

pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use model::{
    ChatConfig, ChatModel, ChatRequest, ChatResponse, Message, MessageRole, UsageMetadata,
};
