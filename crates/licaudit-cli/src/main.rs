//! licaudit - check that every commit in a git history is provably licensed.
//!
//! Exits 0 when every commit is licensed or trivial, 1 when there are
//! findings, and 2 when the audit could not run.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("licaudit: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Run the audit and print the report. Returns whether it was clean.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = cli.config();
    let report = licaudit::audit_repository(&config)
        .with_context(|| format!("auditing {}", config.repository.display()))?;

    output::print_report(cli.json, &report)?;
    Ok(report.is_clean())
}
