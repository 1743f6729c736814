//! Configuration loader
//!
//! Resolves the configuration from, in order:
//! 1. An explicit path (must exist)
//! 2. Project-level config: ./triage.toml
//! 3. Built-in defaults
//!
//! The first source found is used as a whole; sections it omits take their
//! defaults.

use crate::config::schema::TriageConfig;
use crate::error::{Result, TriageError};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "triage.toml";

/// `${VAR}` or `${VAR:default}`
static ENV_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^:}]+)(?::([^}]*))?\}").expect("env reference pattern is valid")
});

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader that looks for ./triage.toml
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            project_config_path: PathBuf::from(PROJECT_CONFIG_FILE),
        }
    }

    /// Use `path` instead of the project-level config
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    /// Override where the project-level config is looked for
    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_config_path = path.into();
        self
    }

    /// The file that [`load`](Self::load) will read, `None` for defaults
    pub fn source(&self) -> Result<Option<&Path>> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(TriageError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.as_path()));
        }

        if self.project_config_path.exists() {
            Ok(Some(self.project_config_path.as_path()))
        } else {
            Ok(None)
        }
    }

    /// Load, expand environment references and validate
    pub fn load(&self) -> Result<TriageConfig> {
        let mut config = match self.source()? {
            Some(path) => {
                let config = Self::load_from_path(path)?;
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            None => {
                debug!("No config file found, using defaults");
                TriageConfig::default()
            }
        };

        resolve_env_vars(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Parse a config file without expansion or validation
    pub fn load_from_path(path: &Path) -> Result<TriageConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            TriageError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            TriageError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand `${VAR:default}` references in provider models and base URLs
fn resolve_env_vars(config: &mut TriageConfig) {
    for provider in &mut config.providers {
        for field in [&mut provider.model, &mut provider.base_url] {
            if let Some(value) = field.as_mut() {
                if let Some(expanded) = expand_env_in_string(value) {
                    debug!(provider = %provider.name, "Expanded environment reference");
                    *value = expanded;
                }
            }
        }
    }
}

/// Expand environment variables in a string
///
/// Supports `${ENV_VAR}` and `${ENV_VAR:default_value}`. An unset variable
/// without a default expands to the empty string. Returns `None` when the
/// string holds no reference.
pub fn expand_env_in_string(s: &str) -> Option<String> {
    if !s.contains("${") {
        return None;
    }

    let expanded = ENV_REF_REGEX.replace_all(s, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        env::var(&caps[1]).unwrap_or_else(|_| default_value.to_string())
    });

    Some(expanded.into_owned())
}
