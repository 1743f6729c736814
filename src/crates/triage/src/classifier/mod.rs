//! Intent classification.
//!
//! [`IntentClassifier`] is the one-method capability the router depends on.
//! [`LlmIntentClassifier`] implements it over any [`llm::ChatModel`], and
//! [`ProviderConfig`] connects the hosted models by name.

pub mod llm_classifier;
pub mod provider;

pub use llm_classifier::{LlmIntentClassifier, PROMPT};
pub use provider::{ProviderConfig, ProviderKind};

use crate::intent::{Intent, UnknownIntent};
use async_trait::async_trait;
use llm::LlmError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Why a query could not be classified.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Missing credential or unusable provider settings; no request was sent
    #[error("{0}")]
    Config(String),

    /// The provider call failed
    #[error(transparent)]
    Provider(#[from] LlmError),

    /// The model answered with something outside the label set
    #[error("Invalid intent label from model: '{0}'")]
    InvalidLabel(String),
}

impl From<UnknownIntent> for ClassifierError {
    fn from(err: UnknownIntent) -> Self {
        ClassifierError::InvalidLabel(err.0)
    }
}

/// Maps a raw query to an [`Intent`].
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<Intent, ClassifierError>;
}

/// A classifier plus the display name it is evaluated and reported under.
#[derive(Clone)]
pub struct NamedClassifier {
    pub name: String,
    pub classifier: Arc<dyn IntentClassifier>,
}

impl NamedClassifier {
    pub fn new(name: impl Into<String>, classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            name: name.into(),
            classifier,
        }
    }
}

impl fmt::Debug for NamedClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedClassifier")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
