//! Request and response bodies of the chat-completions API.

use serde::{Deserialize, Serialize};

use crate::message::{Message, ToolCall};
use crate::tools::ToolDefinition;

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [Message], tools: &'a [ToolDefinition]) -> Self {
        let (tools, tool_choice) = if tools.is_empty() {
            (None, None)
        } else {
            (Some(tools), Some("auto"))
        };
        Self {
            model,
            messages,
            tools,
            tool_choice,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMessage {
    pub content: Option<String>,
    // Some providers send `"tool_calls": null` instead of omitting it.
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    pub message: String,
}

/// Error envelope on non-2xx responses: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub error: ApiError,
}
