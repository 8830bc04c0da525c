//! File loading and merging for cozy-oven configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{Config, ServerConfig};

impl Config {
    /// Loads the global config from `~/.config/cozy-oven/config.toml`.
    ///
    /// Unlike the project file this one is optional in every sense: a
    /// missing file or an undeterminable config directory yields `None`.
    pub(super) fn load_global() -> Result<Option<Self>> {
        let Ok(path) = Self::config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::from_file(&path).map(Some)
    }

    /// Look for cozy-oven.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Self>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::from_file(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            model: project.model.or(global.model),
            base_url: project.base_url.or(global.base_url),
            api_key: project.api_key.or(global.api_key),
            summary_path: project.summary_path.or(global.summary_path),
            ledger_dir: project.ledger_dir.or(global.ledger_dir),
            server: ServerConfig {
                host: project.server.host.or(global.server.host),
                port: project.server.port.or(global.server.port),
            },
        }
    }
}
