//! Entry point for cozy-oven, the customer chat assistant for The Cozy Oven bakery.
//!
//! This binary loads environment variables, sets up logging, parses CLI
//! arguments via [`cli`], and dispatches to the appropriate subcommand handler.

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod error;
mod ledger;
mod message;
mod persona;
mod provider;
mod server;
mod tools;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Runs the cozy-oven CLI.
///
/// Loads `.env` files (silently ignored if absent), installs a stderr
/// tracing subscriber filtered by `RUST_LOG`, parses command-line arguments
/// into a [`cli::Cli`] struct, and dispatches the chosen subcommand via
/// [`cli::run`].
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::parse();
    cli::run(cli).await
}
