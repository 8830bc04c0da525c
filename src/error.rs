//! Error types for a single chat turn.
//!
//! Each failure kind keeps enough detail for logging; the orchestrator
//! collapses all of them into one user-facing `Error: ...` string.

use thiserror::Error;

/// Failure talking to the chat-completions endpoint.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("endpoint error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no choices")]
    Empty,
}

/// Failure resolving or running a tool the model asked for.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    Unknown(String),
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {ledger} ledger: {source}")]
    Ledger {
        ledger: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that aborts a turn before a final reply is produced.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl TurnError {
    /// The single string shown to the user in place of a reply.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}
