//! Intent classification through a hosted chat model.

use super::{ClassifierError, IntentClassifier};
use crate::intent::Intent;
use async_trait::async_trait;
use llm::{ChatModel, ChatRequest, Message};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Prompt template sent for every query; `{query}` is replaced verbatim.
pub const PROMPT: &str = r#"You are an intent classifier.

Available agents:
- FAQ
- ORDER_STATUS

Rules:
- Respond with ONLY one agent label: FAQ or ORDER_STATUS
- Do NOT add punctuation, explanations, or extra text

User query: "{query}""#;

/// Labels are single tokens; this leaves room for a trailing newline.
const MAX_LABEL_TOKENS: usize = 10;

/// Classifies queries by asking a [`ChatModel`] for a bare intent label.
///
/// One request per query with temperature 0. The reply is trimmed and
/// uppercased; anything that is still not `FAQ` or `ORDER_STATUS` is an
/// [`ClassifierError::InvalidLabel`].
#[derive(Clone)]
pub struct LlmIntentClassifier {
    model: Arc<dyn ChatModel>,
}

impl LlmIntentClassifier {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(query: &str) -> String {
        PROMPT.replace("{query}", query)
    }

    fn build_request(query: &str) -> ChatRequest {
        ChatRequest::new(vec![Message::human(Self::build_prompt(query))])
            .with_temperature(0.0)
            .with_max_tokens(MAX_LABEL_TOKENS)
    }
}

impl fmt::Debug for LlmIntentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmIntentClassifier")
            .field("provider", &self.model.provider())
            .field("model", &self.model.model())
            .finish()
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, query: &str) -> Result<Intent, ClassifierError> {
        let response = self.model.chat(Self::build_request(query)).await?;
        let raw = response.text();

        debug!(
            provider = self.model.provider(),
            model = self.model.model(),
            raw = %raw.trim(),
            "Model answered"
        );

        Ok(Intent::parse_label(raw)?)
    }
}
