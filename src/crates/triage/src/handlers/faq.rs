//! Keyword-based FAQ answers.

use super::Handler;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Answer returned when no keyword matches.
pub const DEFAULT_FALLBACK: &str = "I can help with store hours, returns, or shipping.";

/// One keyword and its canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Substring looked for in the lowercased query
    pub keyword: String,
    /// Canned answer returned verbatim
    pub answer: String,
}

impl FaqEntry {
    pub fn new(keyword: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered FAQ entries plus the fallback answer.
///
/// Entry order is significant: when a query contains several keywords the
/// first entry in the list wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqDataset {
    pub fallback: String,
    pub entries: Vec<FaqEntry>,
}

impl FaqDataset {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            fallback: DEFAULT_FALLBACK.to_string(),
            entries,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl Default for FaqDataset {
    fn default() -> Self {
        Self::new(vec![
            FaqEntry::new(
                "hours",
                "We are open from 9am to 8pm Mon-Fri, from 10am to 18pm on Saturday.",
            ),
            FaqEntry::new("return", "You can return items within 30 days of purchase."),
            FaqEntry::new("shipping", "Shipping takes 3–5 business days."),
        ])
    }
}

/// Answers FAQ queries by first-match keyword containment.
#[derive(Debug, Clone)]
pub struct FaqHandler {
    dataset: FaqDataset,
}

impl FaqHandler {
    /// Build a handler over `dataset`. Keywords are lowercased so matching
    /// against the lowercased query is case-insensitive.
    pub fn new(dataset: FaqDataset) -> Self {
        let entries = dataset
            .entries
            .into_iter()
            .map(|entry| FaqEntry {
                keyword: entry.keyword.to_lowercase(),
                answer: entry.answer,
            })
            .collect();

        Self {
            dataset: FaqDataset {
                fallback: dataset.fallback,
                entries,
            },
        }
    }

    pub fn dataset(&self) -> &FaqDataset {
        &self.dataset
    }

    /// True when `text` is exactly one of the canned answers.
    pub fn is_canned_answer(&self, text: &str) -> bool {
        self.dataset.entries.iter().any(|entry| entry.answer == text)
    }
}

impl Default for FaqHandler {
    fn default() -> Self {
        Self::new(FaqDataset::default())
    }
}

impl Handler for FaqHandler {
    fn name(&self) -> &str {
        "faq"
    }

    fn handle(&self, query: &str) -> String {
        let query = query.trim().to_lowercase();

        match self
            .dataset
            .entries
            .iter()
            .find(|entry| query.contains(entry.keyword.as_str()))
        {
            Some(entry) => {
                debug!(keyword = %entry.keyword, "FAQ keyword matched");
                entry.answer.clone()
            }
            None => self.dataset.fallback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURS: &str = "We are open from 9am to 8pm Mon-Fri, from 10am to 18pm on Saturday.";
    const RETURNS: &str = "You can return items within 30 days of purchase.";
    const SHIPPING: &str = "Shipping takes 3–5 business days.";

    #[test]
    fn test_keyword_match() {
        let handler = FaqHandler::default();
        assert_eq!(handler.handle("What are your store hours?"), HOURS);
        assert_eq!(handler.handle("Can I return a jacket?"), RETURNS);
        assert_eq!(handler.handle("how long does shipping take"), SHIPPING);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let handler = FaqHandler::default();
        assert_eq!(handler.handle("  SHIPPING COSTS?  "), SHIPPING);
    }

    #[test]
    fn test_substring_match() {
        let handler = FaqHandler::default();
        // "returns" contains "return"
        assert_eq!(handler.handle("What is your returns policy?"), RETURNS);
    }

    #[test]
    fn test_first_keyword_in_order_wins() {
        let handler = FaqHandler::default();
        assert_eq!(handler.handle("shipping and return rules"), RETURNS);
        assert_eq!(handler.handle("shipping hours"), HOURS);
    }

    #[test]
    fn test_fallback() {
        let handler = FaqHandler::default();
        assert_eq!(handler.handle("Do you sell gift cards?"), DEFAULT_FALLBACK);
        assert_eq!(handler.handle(""), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_custom_dataset_keywords_are_lowercased() {
        let dataset = FaqDataset::new(vec![FaqEntry::new("Parking", "Free parking behind the store.")])
            .with_fallback("Ask me about parking.");
        let handler = FaqHandler::new(dataset);

        assert_eq!(handler.handle("is there PARKING?"), "Free parking behind the store.");
        assert_eq!(handler.handle("hours?"), "Ask me about parking.");
    }

    #[test]
    fn test_is_canned_answer() {
        let handler = FaqHandler::default();
        assert!(handler.is_canned_answer(HOURS));
        assert!(!handler.is_canned_answer(DEFAULT_FALLBACK));
        assert!(!handler.is_canned_answer("Order 1111 status: shipped"));
    }
}
