//! Labeled test queries.
//!
//! A fixture is a JSON array of `{"query": ..., "expected": "FAQ" | "ORDER_STATUS"}`
//! objects. Labels are matched exactly; nothing is coerced.

use crate::error::{Result, TriageError};
use crate::intent::Intent;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One query and the intent it should be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub query: String,
    pub expected: Intent,
}

impl TestCase {
    pub fn new(query: impl Into<String>, expected: Intent) -> Self {
        Self {
            query: query.into(),
            expected,
        }
    }
}

#[derive(Deserialize)]
struct RawCase {
    query: String,
    expected: String,
}

/// Parse fixture JSON.
pub fn parse_fixture(content: &str) -> Result<Vec<TestCase>> {
    let raw: Vec<RawCase> = serde_json::from_str(content)
        .map_err(|e| TriageError::Fixture(format!("invalid fixture JSON: {}", e)))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, case)| {
            let expected = Intent::ALL
                .into_iter()
                .find(|intent| intent.label() == case.expected)
                .ok_or_else(|| {
                    TriageError::Fixture(format!(
                        "entry {} ({:?}): unknown expected intent '{}'",
                        index, case.query, case.expected
                    ))
                })?;
            Ok(TestCase::new(case.query, expected))
        })
        .collect()
}

/// Load and parse a fixture file.
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<TestCase>> {
    let path = path.as_ref();
    debug!("Loading fixture from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        TriageError::Fixture(format!("failed to read {}: {}", path.display(), e))
    })?;

    let cases = parse_fixture(&content)?;
    debug!("Loaded {} test cases", cases.len());
    Ok(cases)
}
