//! Error types for triage setup: configuration and fixture loading.
//!
//! Routing itself never fails; classification failures are
//! [`ClassifierError`](crate::classifier::ClassifierError) and are absorbed by
//! the router.

use thiserror::Error;

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Errors raised while preparing a routing or evaluation run
#[derive(Debug, Error)]
pub enum TriageError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid fixture content
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
