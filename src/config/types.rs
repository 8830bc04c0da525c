//! Struct definitions for cozy-oven configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, deserialized from `config.toml` / `cozy-oven.toml`.
///
/// Every field is optional so the assistant runs with defaults when no
/// config file exists; accessors in `resolve.rs` fill the gaps.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model identifier sent with each completion request.
    pub model: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: Option<String>,
    /// API key. `OPENROUTER_API_KEY` in the environment takes precedence.
    pub api_key: Option<String>,
    /// Business summary substituted into the system prompt.
    pub summary_path: Option<PathBuf>,
    /// Directory holding the leads and feedback ledgers.
    pub ledger_dir: Option<PathBuf>,
    /// HTTP front-end settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Bind settings for `cozy-oven serve`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}
