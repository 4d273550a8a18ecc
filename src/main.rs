//! matchday - Football data relay with a stale-tolerant cache
//!
//! Fetches fixtures, results, tables and player stats from the configured
//! upstreams and prints them as JSON, serving cached copies when the
//! upstream is slow or down.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchday::app;
use matchday::cli::Cli;

/// Sets up stderr logging; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "matchday=debug" } else { "matchday=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match app::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
