//! Environment variable substitution, defaults, and API key resolution.

use std::path::PathBuf;

use super::types::Config;

use crate::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_SUMMARY_PATH,
};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        for field in [&mut self.model, &mut self.base_url, &mut self.api_key] {
            if let Some(value) = field {
                *value = Self::resolve_str(value);
            }
        }
        if let Some(ref mut host) = self.server.host {
            *host = Self::resolve_str(host);
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    ///
    /// Substituted values are not scanned again.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        let mut cursor = 0;
        while let Some(offset) = result[cursor..].find("{env:") {
            let start = cursor + offset;
            let Some(end) = result[start..].find('}') else {
                break;
            };
            let var_name = &result[start + 5..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
            cursor = start + value.len();
        }
        result
    }

    /// Resolve the API key: `OPENROUTER_API_KEY` first, then config value.
    /// Empty values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(val) = std::env::var(API_KEY_ENV) {
            if !val.is_empty() {
                return Some(val);
            }
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }

    /// Model identifier, falling back to the built-in default.
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Endpoint base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn summary_path(&self) -> PathBuf {
        self.summary_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_PATH))
    }

    /// Ledger directory; the working directory when unset.
    pub fn ledger_dir(&self) -> PathBuf {
        self.ledger_dir.clone().unwrap_or_default()
    }

    pub fn server_host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn server_port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    /// Copy of the config safe to print: the API key is masked.
    pub fn redacted(&self) -> Config {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("********".to_string());
        }
        copy
    }
}
