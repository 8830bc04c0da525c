//! Command-line interface definition and dispatch for cozy-oven.
//!
//! Uses [`clap`] for argument parsing with derive macros. Every chat-facing
//! subcommand builds the same [`Assistant`] from the loaded config and
//! differs only in how it collects user input.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;

use crate::agent::Assistant;
use crate::config::Config;
use crate::ledger::Ledger;
use crate::provider::Provider;
use crate::tools::ToolRegistry;
use crate::{chat, persona, server};

/// Top-level CLI structure for cozy-oven.
#[derive(Parser)]
#[command(name = "cozy-oven", about = "Chat assistant for The Cozy Oven bakery")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the cozy-oven CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask a one-shot question
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Start an interactive chat session
    Chat {
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Serve the chat endpoint over HTTP
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the resolved config (API key masked)
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Builds the assistant from config: endpoint client, tools, and system prompt.
fn build_assistant(mut config: Config, model: Option<String>) -> Result<Assistant> {
    if model.is_some() {
        config.model = model;
    }
    let provider = Provider::from_config(&config)?;
    let summary = persona::load_summary(&config.summary_path())?;
    let ledger = Ledger::new(config.ledger_dir());
    tracing::debug!(
        model = provider.model(),
        ledger_dir = %ledger.dir().display(),
        "assistant configured"
    );
    Ok(Assistant::new(
        Arc::new(provider),
        ToolRegistry::with_builtins(ledger),
        persona::system_prompt(&summary),
    ))
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask { prompt, model } => {
            let prompt = prompt.join(" ");
            if prompt.trim().is_empty() {
                anyhow::bail!("No prompt provided. Usage: cozy-oven ask \"your question here\"");
            }
            let assistant = build_assistant(Config::load()?, model)?;

            println!("{} {}", ">".green().bold(), prompt);
            println!();
            let reply = assistant.reply(&prompt, &[]).await;
            println!("{}", reply);
            Ok(())
        }
        Commands::Chat { model } => {
            let config = Config::load()?;
            let model_name = model
                .clone()
                .unwrap_or_else(|| config.model_name().to_string());
            let assistant = build_assistant(config, model)?;
            chat::run_chat(&assistant, &model_name).await
        }
        Commands::Serve { host, port, model } => {
            let config = Config::load()?;
            let host = host.unwrap_or_else(|| config.server_host().to_string());
            let port = port.unwrap_or(config.server_port());
            let assistant = build_assistant(config, model)?;
            server::run_server(Arc::new(assistant), &host, port).await
        }
        Commands::Config { action } => {
            let config = Config::load()?;
            match action {
                ConfigAction::Show => {
                    if let Ok(path) = Config::config_path() {
                        println!("{} {}", "Config path:".bold(), path.display());
                        println!();
                    }
                    let toml_str = toml::to_string_pretty(&config.redacted())?;
                    println!("{}", toml_str);
                    println!("{} {}", "model:".bold(), config.model_name());
                    println!("{} {}", "base_url:".bold(), config.base_url());
                }
            }
            Ok(())
        }
    }
}
