//! medverify — terminal client for the Med-Verify misinformation detector
//!
//! Sends a medical claim (text or article URL) to the verification service,
//! shows the analysis stages while waiting, and prints the report.
//!
//! # Subcommands
//! - `check <input> [--json]`   — verify one claim
//! - `check --example <N>`      — verify one of the canned example claims
//! - `examples`                 — list the canned example claims
//! - `ping`                     — GET the service root
//! - `interactive`              — landing → sign-in → dashboard session

mod interactive;

use clap::{Parser, Subcommand};
use medverify_core::report::stage_line;
use medverify_core::{
    example_label, Coordinator, MedVerifyConfig, MedVerifyError, Report, VerificationResult,
    EXAMPLE_QUERIES,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "medverify",
    version,
    about = "Med-Verify — AI-powered medical misinformation detector (terminal client)"
)]
struct Cli {
    /// Verification endpoint URL (overrides the config file)
    #[arg(long, env = "MEDVERIFY_ENDPOINT")]
    endpoint: Option<String>,

    /// Optional TOML config file
    #[arg(short, long, default_value = "medverify.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify a medical claim or article URL
    Check {
        /// Claim text or URL to verify
        #[arg(required_unless_present = "example")]
        input: Option<String>,

        /// Verify a canned example instead (see `medverify examples`)
        #[arg(short, long, conflicts_with = "input")]
        example: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Do not print analysis stages to stderr
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the canned example claims
    Examples,

    /// Check that the verification service is reachable
    Ping,

    /// Walk through the landing page, sign-in and dashboard
    Interactive,
}

// ============================================================================
// Output Types
// ============================================================================

/// JSON output of `check --json`: the raw service result plus its rendering.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    result: &'a VerificationResult,
    report: Report,
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(cli: &Cli) -> Result<MedVerifyConfig, MedVerifyError> {
    let mut config = MedVerifyConfig::load(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    Ok(config)
}

/// Print each new stage line to stderr until the submission settles.
pub(crate) fn spawn_progress(coordinator: &Coordinator) -> JoinHandle<()> {
    let mut rx = coordinator.subscribe();
    tokio::spawn(async move {
        let mut last = rx.borrow().stage;
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if state.stage != last {
                if let Some(line) = stage_line(state.stage) {
                    eprintln!("{}", line);
                }
                last = state.stage;
            }
            if !state.busy {
                break;
            }
        }
    })
}

async fn do_check(
    config: &MedVerifyConfig,
    input: Option<String>,
    example: Option<usize>,
    json_output: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    if let Some(n) = example {
        if n == 0 || n > EXAMPLE_QUERIES.len() {
            anyhow::bail!("no example {} (choose 1-{})", n, EXAMPLE_QUERIES.len());
        }
    }

    let (coordinator, client) = Coordinator::from_config(config)?;
    tracing::debug!(endpoint = client.endpoint(), "Checking claim");

    let progress = (!quiet).then(|| spawn_progress(&coordinator));

    let outcome = match example {
        Some(n) => coordinator.submit_example(n - 1).await,
        None => coordinator.submit(input.as_deref().unwrap_or_default()).await,
    };

    if let Some(progress) = progress {
        progress.abort();
    }

    let result = match outcome {
        Ok(r) => r,
        Err(e) => {
            eprintln!("medverify: {}", e);
            std::process::exit(1);
        }
    };

    let report = Report::from_result(&result);
    if json_output {
        let output = CheckOutput {
            result: &result,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report.to_text());
    }

    Ok(())
}

fn do_examples() {
    for (i, query) in EXAMPLE_QUERIES.iter().enumerate() {
        println!("{}. {}", i + 1, example_label(query));
        println!("   {}", query);
    }
}

async fn do_ping(config: &MedVerifyConfig) -> anyhow::Result<()> {
    let (_, client) = Coordinator::from_config(config)?;
    match client.ping().await {
        Ok(greeting) => {
            println!("Service:  {}", client.root_url());
            println!("Endpoint: {}", client.endpoint());
            println!("Says:     {}", greeting.trim());
        }
        Err(e) => {
            eprintln!("medverify: cannot reach {} — {}", client.root_url(), e);
            std::process::exit(1);
        }
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("medverify: failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let result = match cli.command {
        Commands::Check {
            input,
            example,
            json,
            quiet,
        } => do_check(&config, input, example, json, quiet).await,
        Commands::Examples => {
            do_examples();
            Ok(())
        }
        Commands::Ping => do_ping(&config).await,
        Commands::Interactive => interactive::run(&config).await,
    };

    if let Err(e) = result {
        eprintln!("medverify: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
