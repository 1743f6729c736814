//! The intent label set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse category a customer query is routed by.
///
/// The textual form is the uppercase label (`FAQ`, `ORDER_STATUS`), which is
/// also what classifiers must answer with and what fixtures use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Intent {
    /// General store questions (hours, returns, shipping)
    #[serde(rename = "FAQ")]
    Faq,
    /// Questions about a specific order
    #[serde(rename = "ORDER_STATUS")]
    OrderStatus,
}

impl Intent {
    /// Every label, in prompt order.
    pub const ALL: [Intent; 2] = [Intent::Faq, Intent::OrderStatus];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Faq => "FAQ",
            Intent::OrderStatus => "ORDER_STATUS",
        }
    }

    /// Parse model output: surrounding whitespace is stripped and the text is
    /// uppercased, anything else must match a label exactly.
    pub fn parse_label(text: &str) -> Result<Self, UnknownIntent> {
        let label = text.trim().to_uppercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.label() == label)
            .ok_or_else(|| UnknownIntent(text.to_string()))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::parse_label(s)
    }
}

/// Text that is not one of the intent labels. Carries the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid intent (expected FAQ or ORDER_STATUS)")]
pub struct UnknownIntent(pub String);
