//! costwatch CLI
//!
//! Command-line entry point for the scheduled cost check.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;

use costwatch::billing::BillingClient;
use costwatch::checker::CostChecker;
use costwatch::handler::{self, InvocationStatus};
use costwatch::notify::TopicPublisher;
use costwatch::Config;

/// costwatch - Scheduled cloud cost alerting
#[derive(Parser)]
#[command(name = "costwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduled cost check invocation
    Run {
        /// Opaque event payload handed over by the scheduler (JSON)
        #[arg(long, default_value = "{}")]
        event: String,
    },

    /// Print the resolved configuration and exit
    ShowConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A local .env is a development convenience; absence is fine
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Run { event } => run_check(&event).await,
        Commands::ShowConfig => match show_config() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// One scheduled invocation.
///
/// The scheduler must never observe a failed invocation; anything that
/// goes wrong below becomes a log line, not an exit code.
async fn run_check(raw_event: &str) -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "error loading configuration");
            return ExitCode::SUCCESS;
        }
    };

    let checker = match build_checker(config) {
        Ok(checker) => checker,
        Err(e) => {
            error!(error = %e, "error building service clients");
            return ExitCode::SUCCESS;
        }
    };

    // The payload is opaque to the check; keep it readable in the logs
    // even when it is not valid JSON.
    let event: serde_json::Value = serde_json::from_str(raw_event)
        .unwrap_or_else(|_| serde_json::Value::String(raw_event.to_string()));

    match handler::invoke(&event, &checker).await {
        InvocationStatus::Completed(_) | InvocationStatus::Failed => ExitCode::SUCCESS,
    }
}

fn build_checker(config: Config) -> costwatch::Result<CostChecker<BillingClient, TopicPublisher>> {
    let source = BillingClient::new(config.billing_endpoint.clone(), config.http_timeout_secs)?;
    let publisher = TopicPublisher::new(config.notify_endpoint.clone(), config.http_timeout_secs)?;
    Ok(CostChecker::new(source, publisher, config))
}

fn show_config() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
