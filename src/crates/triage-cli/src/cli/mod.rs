//! CLI framework for triage
//!
//! Subcommands to route single queries, replay the fixture through one model,
//! compare models on accuracy, and inspect the effective configuration.

pub mod handlers;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triage::{FailurePolicy, IntentInference};

/// triage - LLM intent router for customer queries
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Route customer queries with an LLM intent classifier and evaluate models")]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./triage.toml, then built-in defaults)
    #[arg(long, global = true, env = "TRIAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route a single query and print the response
    Ask {
        /// Customer query
        query: String,

        /// Provider to classify with (defaults to the first configured)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Route every fixture query through one model and print the responses
    Run {
        /// Provider to classify with (defaults to the first configured)
        #[arg(short, long)]
        model: Option<String>,

        /// Labeled query fixture (overrides config)
        #[arg(short, long)]
        fixture: Option<PathBuf>,
    },

    /// Measure routing accuracy and latency per model
    Evaluate {
        /// Comma-separated providers to evaluate (defaults to all configured)
        #[arg(short, long, value_delimiter = ',')]
        models: Vec<String>,

        /// Labeled query fixture (overrides config)
        #[arg(short, long)]
        fixture: Option<PathBuf>,

        /// How predicted intents are determined: reported, response-match
        #[arg(long)]
        inference: Option<IntentInference>,

        /// How failed cases are counted: exclude, count-as-incorrect
        #[arg(long)]
        failures: Option<FailurePolicy>,

        /// Print a per-query breakdown for each model
        #[arg(short, long)]
        details: bool,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "triage",
            "--config",
            "custom.toml",
            "evaluate",
            "--models",
            "GPT,Claude",
            "--inference",
            "response-match",
            "--failures",
            "count-as-incorrect",
            "--details",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Evaluate {
                models,
                inference,
                failures,
                details,
                format,
                ..
            } => {
                assert_eq!(models, ["GPT", "Claude"]);
                assert_eq!(inference, Some(IntentInference::ResponseMatch));
                assert_eq!(failures, Some(FailurePolicy::CountAsIncorrect));
                assert!(details);
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ask_with_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["triage", "ask", "Where is order 1111?", "-m", "gemini", "-v"])
            .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Ask { query, model } => {
                assert_eq!(query, "Where is order 1111?");
                assert_eq!(model.as_deref(), Some("gemini"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["triage", "evaluate", "--failures", "sometimes"]).is_err());
    }
}
