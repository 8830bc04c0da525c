//! HTTP implementation of [`CompletionClient`].
//!
//! Contains the [`Provider`] struct which posts transcripts to an
//! OpenAI-compatible `/chat/completions` endpoint with bearer auth and
//! decodes the first choice into a [`Completion`].

use anyhow::{Context, Result};

use super::wire::{ChatRequest, ChatResponse, ErrorBody};
use super::{Completion, CompletionClient};
use crate::config::Config;
use crate::error::CompletionError;
use crate::message::Message;
use crate::tools::ToolDefinition;

/// A configured endpoint ready to handle completion requests.
///
/// Holds a pooled `reqwest` client, so one `Provider` is shared by every
/// session the process serves.
pub struct Provider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Provider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found in the environment or config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolve_api_key().with_context(|| {
            format!(
                "No API key found. Set {} or configure api_key in config.toml",
                crate::constants::API_KEY_ENV
            )
        })?;
        Ok(Self::new(config.base_url(), api_key, config.model_name()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl CompletionClient for Provider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Completion, CompletionError> {
        let request = ChatRequest::new(&self.model, messages, tools);
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the provider's own message over the raw body when it has one.
            let body = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(CompletionError::Status { status, body });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;
        if let Some(err) = parsed.error {
            return Err(CompletionError::Api(err.message));
        }

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::Empty)?;
        Ok(Completion {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}
