//! Command handlers for the triage CLI

use super::output;
use super::OutputFormat;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use triage::fixture::load_fixture;
use triage::{
    ClassifierError, ConfigLoader, Disposition, EvaluationOptions, Evaluator, FailurePolicy,
    IntentInference, NamedClassifier, ProviderConfig, Router, TestCase, TriageConfig,
};

const CREDENTIALS_HINT: &str = "Check your API key or LLM configuration.";

/// Load configuration from `path`, ./triage.toml or defaults
pub fn load_config(path: Option<&Path>) -> Result<TriageConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_path(path);
    }
    Ok(loader.load()?)
}

/// Handle `ask`
pub async fn handle_ask(config: &TriageConfig, query: &str, model: Option<&str>) -> Result<()> {
    let provider = select_provider(config, model)?;
    let classifier = connect(provider)?;
    let router = build_router(config, &classifier);

    let outcome = router.dispatch(query).await;
    println!("{}", outcome.response);

    if matches!(outcome.disposition, Disposition::ClassificationFailed(_)) {
        eprintln!("{}", CREDENTIALS_HINT.yellow());
    }

    Ok(())
}

/// Handle `run`
pub async fn handle_run(
    config: &TriageConfig,
    model: Option<&str>,
    fixture: Option<PathBuf>,
) -> Result<()> {
    let cases = load_cases(config, fixture)?;
    let provider = select_provider(config, model)?;
    let classifier = connect(provider)?;
    let router = build_router(config, &classifier);

    println!("Testing LLM router with {}\n", classifier.name);

    for case in &cases {
        let outcome = router.dispatch(&case.query).await;

        println!("Query: {}", case.query);
        println!("Response: {}", outcome.response);
        println!("Expected intent: {}", case.expected);
        if matches!(outcome.disposition, Disposition::ClassificationFailed(_)) {
            println!("{}", CREDENTIALS_HINT.yellow());
        }
        println!();
    }

    Ok(())
}

/// Arguments of `evaluate`
#[derive(Debug, Default)]
pub struct EvaluateArgs {
    pub models: Vec<String>,
    pub fixture: Option<PathBuf>,
    pub inference: Option<IntentInference>,
    pub failures: Option<FailurePolicy>,
    pub details: bool,
    pub format: OutputFormat,
}

/// Handle `evaluate`
pub async fn handle_evaluate(config: &TriageConfig, args: EvaluateArgs) -> Result<()> {
    let providers: Vec<&ProviderConfig> = if args.models.is_empty() {
        config.providers.iter().collect()
    } else {
        args.models
            .iter()
            .map(|name| select_provider(config, Some(name.as_str())))
            .collect::<Result<_>>()?
    };

    let cases = load_cases(config, args.fixture)?;

    let mut classifiers = Vec::new();
    let mut skipped = Vec::new();
    for provider in providers {
        match provider.classifier() {
            Ok(classifier) => classifiers.push(classifier),
            Err(e) => {
                debug!(provider = %provider.name, error = %e, "Skipping provider");
                skipped.push((provider.name.clone(), e.to_string()));
            }
        }
    }

    let options = EvaluationOptions {
        inference: args.inference.unwrap_or(config.evaluation.inference),
        failures: args.failures.unwrap_or(config.evaluation.failures),
    };
    info!(
        cases = cases.len(),
        models = classifiers.len(),
        inference = %options.inference,
        failures = %options.failures,
        "Starting evaluation"
    );

    let evaluator = Evaluator::new(
        Arc::new(config.faq_handler()),
        Arc::new(config.order_handler()),
    )
    .with_options(options);

    if args.format == OutputFormat::Table {
        println!("Evaluating LLM router accuracy and time per query...\n");
    }

    let results = evaluator.evaluate(&cases, &classifiers).await;

    match args.format {
        OutputFormat::Json => {
            let report = output::json_report(&results, &skipped, args.details);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            if !results.is_empty() {
                println!("{}", output::summary_table(&results));
            }

            for (name, reason) in &skipped {
                println!("{} {}: {}", "Skipped".yellow().bold(), name, reason);
            }

            if args.details {
                for result in &results {
                    println!("\n{}", result.name.bold().underline());
                    println!("{}", output::details_table(result));
                }
            }
        }
    }

    if classifiers.is_empty() {
        eprintln!("{}", CREDENTIALS_HINT.yellow());
    }

    Ok(())
}

/// Handle `config`
pub fn handle_config(config: &TriageConfig, path: Option<&Path>) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_path(path);
    }

    match loader.source()? {
        Some(source) => println!("# Loaded from {}", source.display()),
        None => println!("# Built-in defaults"),
    }
    println!("{}", config.to_toml()?);

    Ok(())
}

fn select_provider<'a>(
    config: &'a TriageConfig,
    name: Option<&str>,
) -> Result<&'a ProviderConfig> {
    match name {
        Some(name) => config.provider(name).ok_or_else(|| {
            let known: Vec<&str> = config.providers.iter().map(|p| p.name.as_str()).collect();
            anyhow!(
                "Unknown model '{}' (configured: {})",
                name,
                known.join(", ")
            )
        }),
        None => config
            .providers
            .first()
            .ok_or_else(|| anyhow!("No providers configured")),
    }
}

fn connect(provider: &ProviderConfig) -> Result<NamedClassifier> {
    match provider.classifier() {
        Ok(classifier) => Ok(classifier),
        Err(e @ ClassifierError::Config(_)) => {
            eprintln!("{}", CREDENTIALS_HINT.yellow());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn build_router(config: &TriageConfig, classifier: &NamedClassifier) -> Router {
    Router::with_default_handlers(
        classifier.classifier.clone(),
        Arc::new(config.faq_handler()),
        Arc::new(config.order_handler()),
    )
}

fn load_cases(config: &TriageConfig, fixture: Option<PathBuf>) -> Result<Vec<TestCase>> {
    let path = fixture.unwrap_or_else(|| config.evaluation.fixture.clone());
    load_fixture(&path).with_context(|| format!("Failed to load fixture {}", path.display()))
}
