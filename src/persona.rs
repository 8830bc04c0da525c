//! System prompt assembly.
//!
//! The mission text comes from a business summary file when one exists,
//! otherwise from [`FALLBACK_SUMMARY`].

use anyhow::{Context, Result};
use std::path::Path;

use crate::constants::FALLBACK_SUMMARY;

/// Reads the business summary at `path`, falling back to the built-in text
/// when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_summary(path: &Path) -> Result<String> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no business summary found, using default");
        return Ok(FALLBACK_SUMMARY.to_string());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read business summary from {:?}", path))
}

/// Builds the assistant's system prompt around `summary`.
pub fn system_prompt(summary: &str) -> String {
    format!(
        "You are the friendly assistant for The Cozy Oven bakery. \n\
         Mission: {summary}\n\
         Rules: Be friendly. Only use tools if the user wants to sign up or if you don't know an answer."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_summary_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let summary = load_summary(&dir.path().join("absent.txt")).unwrap();
        assert_eq!(summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_summary_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("business_summary.txt");
        std::fs::write(&path, "Sourdough since 1998.").unwrap();
        assert_eq!(load_summary(&path).unwrap(), "Sourdough since 1998.");
    }

    #[test]
    fn test_prompt_embeds_mission() {
        let prompt = system_prompt("Sourdough since 1998.");
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("You are the friendly assistant for The Cozy Oven bakery."));
        assert_eq!(lines[1], "Mission: Sourdough since 1998.");
        assert!(lines[2].starts_with("Rules: Be friendly."));
    }
}
