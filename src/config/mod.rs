//! Configuration types and path resolution for cozy-oven.
//!
//! Settings come from an optional global TOML file at the XDG config path
//! (`~/.config/cozy-oven/config.toml`) and an optional per-project
//! `cozy-oven.toml`. The API key normally comes from `OPENROUTER_API_KEY`.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;

use anyhow::Result;

impl Config {
    /// Load config with precedence: project > global > defaults.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?.unwrap_or_default();
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        Ok(config)
    }
}
