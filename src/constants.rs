//! Centralized constants for cozy-oven.
//!
//! Default endpoint settings, file names, prompt text, and the fixed strings
//! returned by tools all live here so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "cozy-oven";

// --- Completion endpoint ---

/// Default OpenAI-compatible base URL (OpenRouter).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier sent with every completion request.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct";

/// Environment variable holding the endpoint credential.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

// --- Configuration files ---

/// Global configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "cozy-oven.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

// --- Persona ---

/// Default location of the business summary substituted into the system prompt.
pub const DEFAULT_SUMMARY_PATH: &str = "me/business_summary.txt";

/// Mission text used when the business summary file is absent.
pub const FALLBACK_SUMMARY: &str =
    "The Cozy Oven is a small-batch, artisanal bakery that embodies slow, mindful moments.";

// --- Ledgers ---

/// File receiving one line per recorded lead.
pub const LEADS_LEDGER_FILENAME: &str = "leads_log.jsonl";

/// File receiving one line per recorded feedback question.
pub const FEEDBACK_LEDGER_FILENAME: &str = "feedback_log.jsonl";

// --- Tool results ---

/// Returned by `record_customer_interest` after a successful write.
pub const LEAD_CONFIRMATION: &str =
    "Lead recorded successfully. Thank you for your interest in The Cozy Oven!";

/// Returned by `record_feedback` after a successful write.
pub const FEEDBACK_CONFIRMATION: &str = "Thanks for your feedback! The team will review this.";

/// Tool result used when the model asks for a tool that is not registered.
pub const UNKNOWN_TOOL_RESULT: &str = "Tool error.";

// --- HTTP front-end ---

/// Default bind address for `serve`.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port for `serve`.
pub const DEFAULT_PORT: u16 = 7860;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cozy_oven=info,tower_http=info";
