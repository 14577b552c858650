//! snapup - snapcraft part pin auditor CLI tool
//!
//! Reads snapcraft.yaml and reports, for every part pinned to a tag or a
//! branch, whether the upstream repository (GitHub or GitLab) has newer ones.

use clap::Parser;
use snapup::cli::CliArgs;
use snapup::orchestrator::Orchestrator;
use snapup::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter
fn init_tracing(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %args.path.display(),
        no_fetch = args.no_fetch,
        "starting audit"
    );

    let orchestrator = Orchestrator::new(args.clone());
    let result = orchestrator.run().await;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.no_color));

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    // Partial success - some errors occurred
    if !result.errors.is_empty() {
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}
