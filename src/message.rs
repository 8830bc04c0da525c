//! Message types for the conversation transcript.
//!
//! [`Message`] serializes directly into the chat-completions wire format, so
//! the transcript built by the orchestrator is sent to the endpoint verbatim.
//! [`ChatTurn`] is the UI-level history unit that front-ends hold between
//! requests.

use serde::{Deserialize, Serialize};

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier echoed back in the matching tool-result message.
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: ToolFunction,
}

/// Name and raw arguments of a requested invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    /// JSON-encoded argument object, exactly as the endpoint sent it.
    #[serde(default)]
    pub arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

impl ToolCall {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: ToolFunction {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// The role of a message sender in the conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single transcript entry.
///
/// Assistant messages that request tools may carry no text; `content` is
/// then serialized as `null`, which is what the endpoint itself returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    fn plain(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::plain(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, text)
    }

    /// Creates a tool result message answering the call with `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Returns the text content, or `""` when the message has none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// One exchange of prior history as the UI remembers it.
///
/// Serialized as a two-element array `[user, assistant]`, matching the
/// history shape chat front-ends post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn(pub String, pub String);

impl ChatTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self(user.into(), assistant.into())
    }

    pub fn user(&self) -> &str {
        &self.0
    }

    pub fn assistant(&self) -> &str {
        &self.1
    }

    /// Expands the turn into its user and assistant transcript entries.
    pub fn to_messages(&self) -> [Message; 2] {
        [Message::user(&self.0), Message::assistant(&self.1)]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "you"),
            Role::Assistant => write!(f, "cozy oven"),
            Role::Tool => write!(f, "tool"),
        }
    }
}
