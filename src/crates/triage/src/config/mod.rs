//! Configuration management for triage
//!
//! TOML schema with built-in defaults for every section, plus the loader that
//! resolves which file to read.

pub mod loader;
pub mod schema;

pub use loader::{expand_env_in_string, ConfigLoader, PROJECT_CONFIG_FILE};
pub use schema::{EvaluationConfig, TriageConfig};
