//! Remote LLM provider implementations.
//!
//! Each provider requires an API key and issues one HTTP request per chat call.
//!
//! # Providers
//!
//! - **OpenAI** - chat completions API
//! - **Gemini** - Google's `generateContent` API
//! - **Claude** - Anthropic's messages API

pub mod claude;
pub mod gemini;
pub mod openai;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
