//! Chat-completions endpoint client for cozy-oven.
//!
//! [`CompletionClient`] is the seam the orchestrator talks through;
//! [`Provider`] implements it against an OpenAI-compatible HTTP endpoint
//! (OpenRouter by default). Tests substitute scripted clients.

mod client;
mod wire;

pub use client::Provider;

use crate::error::CompletionError;
use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolDefinition;

/// The assistant message returned by one completion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Text content, absent when the model only requested tools.
    pub content: Option<String>,
    /// Tool invocations, in the order the endpoint listed them.
    pub tool_calls: Vec<ToolCall>,
}

impl Completion {
    #[cfg(test)]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls: calls,
        }
    }

    pub fn requests_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Converts the completion into the assistant transcript entry,
    /// keeping the raw tool-call metadata.
    pub fn into_message(self) -> Message {
        Message {
            role: Role::Assistant,
            content: self.content,
            tool_calls: self.tool_calls,
            tool_call_id: None,
        }
    }
}

/// A stateless request/response boundary to a chat-completions endpoint.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `messages` and returns the next assistant message.
    ///
    /// When `tools` is non-empty they are offered with automatic tool
    /// selection; when empty, no tool fields are sent at all.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Completion, CompletionError>;
}
