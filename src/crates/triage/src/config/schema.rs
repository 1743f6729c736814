//! Configuration schema for triage
//!
//! Every section is optional; a missing section takes the built-in default.

use crate::classifier::ProviderConfig;
use crate::error::{Result, TriageError};
use crate::handlers::{FaqDataset, FaqHandler, OrderBook, OrderStatusHandler};
use crate::router::{EvaluationOptions, FailurePolicy, IntentInference};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Main triage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// FAQ keywords, answers and fallback
    pub faq: FaqDataset,

    /// Known orders by 4-digit ID
    pub orders: OrderBook,

    /// Hosted models usable as classifiers, in report order
    pub providers: Vec<ProviderConfig>,

    /// Evaluation defaults
    pub evaluation: EvaluationConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            faq: FaqDataset::default(),
            orders: OrderBook::default(),
            providers: ProviderConfig::defaults(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Labeled query fixture
    pub fixture: PathBuf,

    /// How predicted intents are determined
    pub inference: IntentInference,

    /// How failed cases are counted
    pub failures: FailurePolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            fixture: PathBuf::from("fixtures/test_queries.json"),
            inference: IntentInference::default(),
            failures: FailurePolicy::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn options(&self) -> EvaluationOptions {
        EvaluationOptions {
            inference: self.inference,
            failures: self.failures,
        }
    }
}

impl TriageConfig {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.faq.entries.iter().enumerate() {
            if entry.keyword.trim().is_empty() {
                return Err(TriageError::Config(format!(
                    "faq.entries[{}]: keyword must not be empty",
                    index
                )));
            }
        }

        for (order_id, _) in self.orders.iter() {
            if !OrderBook::is_valid_id(order_id) {
                return Err(TriageError::Config(format!(
                    "orders: '{}' is not a 4-digit order ID",
                    order_id
                )));
            }
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            let name = provider.name.trim();
            if name.is_empty() {
                return Err(TriageError::Config(
                    "providers: name must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(TriageError::Config(format!(
                    "providers: duplicate name '{}'",
                    name
                )));
            }
            if provider.timeout_secs == 0 {
                return Err(TriageError::Config(format!(
                    "providers.{}: timeout_secs must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Look up a provider by name, ignoring case.
    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        let name = name.trim();
        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn faq_handler(&self) -> FaqHandler {
        FaqHandler::new(self.faq.clone())
    }

    pub fn order_handler(&self) -> OrderStatusHandler {
        OrderStatusHandler::new(self.orders.clone())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TriageError::Config(format!("Failed to serialize config: {}", e)))
    }
}
