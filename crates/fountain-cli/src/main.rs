//! Fountain CLI - Deposit monitoring for Fountain stablecoin operations
//!
//! After creating a mint operation, the company funds the temporary wallet the
//! API handed out. This tool follows that deposit until it completes.
//!
//! # Quick Start
//!
//! ```bash
//! # Token from the login endpoint, or put it in .env
//! export FOUNTAIN_TOKEN=eyJhbGciOi...
//!
//! # Three checks, five seconds apart
//! fountain watch 3f6c2a0e-7b1d-4c8e-9a2f-1d0e5b6c7a89
//!
//! # Longer watch against a remote API
//! fountain --server https://api.fountain.example watch <operation-id> --attempts 60 --interval 10
//!
//! # One-off check
//! fountain status <operation-id>
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::*;
use fountain_monitor::MonitorConfig;
use fountain_sdk::{Config, FountainClient, DEFAULT_ENDPOINT};
use fountain_types::OperationId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use commands::{status, watch};

/// Fountain CLI - Temporary wallet deposit monitor
#[derive(Parser)]
#[command(name = "fountain")]
#[command(author = "Fountain Contributors")]
#[command(version)]
#[command(about = "Monitor Fountain stablecoin deposits", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Fountain API URL
    #[arg(long, global = true, env = "FOUNTAIN_API_URL", default_value = DEFAULT_ENDPOINT)]
    server: String,

    /// Bearer token (JWT) for the API
    #[arg(long, global = true, env = "FOUNTAIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    /// Log monitor events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll an operation's temporary wallet until the deposit settles
    Watch {
        /// Operation ID returned when the mint was created
        operation_id: String,

        /// Maximum number of checks
        #[arg(short, long, env = "FOUNTAIN_MAX_ATTEMPTS", default_value = "3")]
        attempts: u32,

        /// Seconds between checks
        #[arg(short, long, env = "FOUNTAIN_POLL_INTERVAL", default_value = "5")]
        interval: u64,
    },

    /// Show an operation's temporary wallet once
    Status {
        /// Operation ID
        operation_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut client = FountainClient::with_config(Config {
        endpoint: cli.server.clone(),
        timeout: Duration::from_secs(cli.timeout),
        token: None,
    })?;
    if let Some(token) = cli.token {
        client = client.with_token(token);
    } else if !cli.json {
        display::warning("No token set (FOUNTAIN_TOKEN); the API will likely reject requests");
    }

    let completed = match cli.command {
        Commands::Watch {
            operation_id,
            attempts,
            interval,
        } => {
            let operation_id = OperationId::parse(&operation_id)?;
            let config = MonitorConfig::with_interval_secs(attempts, interval);
            config.validate()?;
            watch::watch(client, operation_id, config, cli.json).await?
        }
        Commands::Status { operation_id } => {
            let operation_id = OperationId::parse(&operation_id)?;
            status::show_status(&client, &operation_id, cli.json).await?;
            true
        }
    };

    if !completed && !cli.json {
        println!();
        println!("{}", "Deposit not complete.".bright_black());
    }

    Ok(if completed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
