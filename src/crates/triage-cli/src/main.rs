//! triage - command-line entry point
//!
//! Results go to stdout; logs go to stderr so the two can be piped apart.

mod cli;

use clap::Parser;
use cli::handlers::{self, EvaluateArgs};
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let config = handlers::load_config(config_path)?;

    match cli.command {
        Commands::Ask { query, model } => {
            handlers::handle_ask(&config, &query, model.as_deref()).await?;
        }
        Commands::Run { model, fixture } => {
            handlers::handle_run(&config, model.as_deref(), fixture).await?;
        }
        Commands::Evaluate {
            models,
            fixture,
            inference,
            failures,
            details,
            format,
        } => {
            let args = EvaluateArgs {
                models,
                fixture,
                inference,
                failures,
                details,
                format,
            };
            handlers::handle_evaluate(&config, args).await?;
        }
        Commands::Config => {
            handlers::handle_config(&config, config_path)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
