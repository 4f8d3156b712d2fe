//! agrosense-config — credential self-check.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use agrosense_config::constants;
use agrosense_config::{CredentialLoader, Env};

use cli::args::Cli;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let _cli = Cli::parse();

    init_logging()?;

    let loader = CredentialLoader::new(Env::real());
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    cli::self_check(&loader, &mut stdout.lock(), &mut stderr.lock())
        .context("failed to write status")
}

/// Install a stderr subscriber filtered by `AGROSENSE_LOG` (default `warn`).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(constants::ENV_LOG)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
