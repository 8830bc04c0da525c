//! Conversation orchestration: one chat turn, at most one tool round-trip.
//!
//! [`Assistant::reply`] builds the transcript `[system] + history + [user]`,
//! asks the completion endpoint for a reply with the tools offered, and if
//! the model requests tools, runs them in order, appends their results and
//! asks once more with no tools offered. Whatever that second reply says is
//! final, even if it requests more tools.

use std::sync::Arc;

use crate::constants::UNKNOWN_TOOL_RESULT;
use crate::error::{ToolError, TurnError};
use crate::message::{ChatTurn, Message, ToolCall};
use crate::provider::CompletionClient;
use crate::tools::ToolRegistry;

/// Everything one chat turn needs, constructed once and shared by all
/// sessions.
pub struct Assistant {
    client: Arc<dyn CompletionClient>,
    tools: ToolRegistry,
    system_prompt: String,
}

impl Assistant {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        tools: ToolRegistry,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tools,
            system_prompt: system_prompt.into(),
        }
    }

    /// Produces the assistant's reply text for `user_input`.
    ///
    /// Never fails: endpoint errors come back as `Error: <description>`.
    pub async fn reply(&self, user_input: &str, history: &[ChatTurn]) -> String {
        match self.run_turn(user_input, history).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "chat turn failed");
                e.user_message()
            }
        }
    }

    /// Runs one turn, surfacing endpoint failures as [`TurnError`].
    pub async fn run_turn(&self, user_input: &str, history: &[ChatTurn]) -> Result<String, TurnError> {
        let mut transcript = self.build_transcript(user_input, history);
        let definitions = self.tools.definitions();

        let first = self.client.complete(&transcript, &definitions).await?;
        if !first.requests_tools() {
            return Ok(first.content.unwrap_or_default());
        }

        let calls = first.tool_calls.clone();
        transcript.push(first.into_message());
        for call in &calls {
            let result = self.invoke(call).await;
            transcript.push(Message::tool_result(&call.id, result));
        }

        let last = self.client.complete(&transcript, &[]).await?;
        if last.requests_tools() {
            tracing::warn!(
                requested = last.tool_calls.len(),
                "dropping tool calls requested after the tool round-trip"
            );
        }
        Ok(last.content.unwrap_or_default())
    }

    /// Assembles `[system] + flatten(history) + [user]`.
    pub fn build_transcript(&self, user_input: &str, history: &[ChatTurn]) -> Vec<Message> {
        let mut transcript = Vec::with_capacity(history.len() * 2 + 2);
        transcript.push(Message::system(&self.system_prompt));
        for turn in history {
            transcript.extend(turn.to_messages());
        }
        transcript.push(Message::user(user_input));
        transcript
    }

    /// Runs one requested tool and returns the text fed back to the model.
    async fn invoke(&self, call: &ToolCall) -> String {
        tracing::info!(tool = call.name(), call_id = %call.id, "invoking tool");
        match self.tools.execute(call.name(), &call.function.arguments).await {
            Ok(result) => result,
            Err(ToolError::Unknown(name)) => {
                tracing::warn!(tool = %name, "model requested an unknown tool");
                UNKNOWN_TOOL_RESULT.to_string()
            }
            Err(e) => {
                tracing::warn!(tool = call.name(), error = %e, "tool invocation failed");
                format!("Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FEEDBACK_CONFIRMATION, LEAD_CONFIRMATION};
    use crate::error::CompletionError;
    use crate::ledger::{Ledger, LedgerKind};
    use crate::message::Role;
    use crate::provider::Completion;
    use crate::tools::ToolDefinition;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned completions and records every request it receives.
    #[derive(Default)]
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<Completion, CompletionError>>>,
        requests: Mutex<Vec<(Vec<Message>, usize)>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<Completion, CompletionError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(Vec<Message>, usize)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            messages: &[Message],
            tools: &[ToolDefinition],
        ) -> Result<Completion, CompletionError> {
            self.requests
                .lock()
                .unwrap()
                .push((messages.to_vec(), tools.len()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CompletionError::Empty))
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        ledger: Ledger,
        client: Arc<ScriptedClient>,
        assistant: Assistant,
    }

    fn fixture(replies: Vec<Result<Completion, CompletionError>>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path());
        let client = ScriptedClient::new(replies);
        let assistant = Assistant::new(
            client.clone(),
            ToolRegistry::with_builtins(ledger.clone()),
            "You are a bakery assistant.",
        );
        Fixture {
            _dir: dir,
            ledger,
            client,
            assistant,
        }
    }

    fn ledger_lines(ledger: &Ledger, kind: LedgerKind) -> Vec<serde_json::Value> {
        std::fs::read_to_string(ledger.path(kind))
            .map(|s| s.lines().map(|l| serde_json::from_str(l).unwrap()).collect())
            .unwrap_or_default()
    }

    fn assert_no_ledger_writes(ledger: &Ledger) {
        assert!(!ledger.path(LedgerKind::Leads).exists());
        assert!(!ledger.path(LedgerKind::Feedback).exists());
    }

    #[tokio::test]
    async fn test_plain_reply_returned_verbatim() {
        let f = fixture(vec![Ok(Completion::text("We open at 7am."))]);

        let reply = f.assistant.reply("When do you open?", &[]).await;

        assert_eq!(reply, "We open at 7am.");
        let requests = f.client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, 2, "both tools offered on the first call");
        assert_no_ledger_writes(&f.ledger);
    }

    #[tokio::test]
    async fn test_history_order_preserved() {
        let f = fixture(vec![Ok(Completion::text("Yes!"))]);
        let history = [ChatTurn::new("Hi", "Hello!")];

        f.assistant.reply("Do you sell bread?", &history).await;

        let transcript = &f.client.requests()[0].0;
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[0].role, Role::System);
        assert_eq!(transcript[0].text(), "You are a bakery assistant.");
        assert_eq!((transcript[1].role, transcript[1].text()), (Role::User, "Hi"));
        assert_eq!(
            (transcript[2].role, transcript[2].text()),
            (Role::Assistant, "Hello!")
        );
        assert_eq!(
            (transcript[3].role, transcript[3].text()),
            (Role::User, "Do you sell bread?")
        );
    }

    #[tokio::test]
    async fn test_lead_round_trip() {
        let call = ToolCall::new(
            "call_1",
            "record_customer_interest",
            r#"{"name": "Jo", "email": "jo@x.com", "message": "call me"}"#,
        );
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![call.clone()])),
            Ok(Completion::text("Thanks Jo, we'll be in touch!")),
        ]);

        let reply = f.assistant.reply("Sign me up", &[]).await;
        assert_eq!(reply, "Thanks Jo, we'll be in touch!");

        let leads = ledger_lines(&f.ledger, LedgerKind::Leads);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0]["name"], "Jo");
        assert_eq!(leads[0]["email"], "jo@x.com");
        assert_eq!(leads[0]["message"], "call me");
        assert!(leads[0]["timestamp"].is_string());
        assert!(!f.ledger.path(LedgerKind::Feedback).exists());

        let requests = f.client.requests();
        assert_eq!(requests.len(), 2);
        let (followup, tools_offered) = &requests[1];
        assert_eq!(*tools_offered, 0, "follow-up request carries no tools");
        assert_eq!(followup.len(), 4);
        assert_eq!(followup[2].role, Role::Assistant);
        assert_eq!(followup[2].tool_calls, vec![call]);
        assert_eq!(followup[3].role, Role::Tool);
        assert_eq!(followup[3].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(followup[3].text(), LEAD_CONFIRMATION);
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_fixed_error_result() {
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![ToolCall::new("call_x", "order_cake", "{}")])),
            Ok(Completion::text("Sorry, I can't do that.")),
        ]);

        let reply = f.assistant.reply("Order a cake", &[]).await;
        assert_eq!(reply, "Sorry, I can't do that.");

        let followup = &f.client.requests()[1].0;
        let tool_msg = followup.last().unwrap();
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_x"));
        assert_eq!(tool_msg.text(), UNKNOWN_TOOL_RESULT);
        assert_no_ledger_writes(&f.ledger);
    }

    #[tokio::test]
    async fn test_first_call_failure_is_user_visible() {
        let f = fixture(vec![Err(CompletionError::Api("invalid api key".to_string()))]);

        let reply = f.assistant.reply("Hello", &[]).await;

        assert!(reply.starts_with("Error: "));
        assert!(reply.contains("invalid api key"));
        assert_eq!(f.client.requests().len(), 1, "no retry");
        assert_no_ledger_writes(&f.ledger);
    }

    #[tokio::test]
    async fn test_followup_failure_after_tool_ran() {
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![ToolCall::new(
                "call_1",
                "record_feedback",
                r#"{"question": "Vegan croissants?"}"#,
            )])),
            Err(CompletionError::Empty),
        ]);

        let reply = f.assistant.reply("Vegan croissants?", &[]).await;

        assert_eq!(reply, "Error: response contained no choices");
        assert_eq!(ledger_lines(&f.ledger, LedgerKind::Feedback).len(), 1);
    }

    #[tokio::test]
    async fn test_multiple_calls_run_in_request_order() {
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![
                ToolCall::new("call_b", "record_feedback", r#"{"question": "first"}"#),
                ToolCall::new("call_a", "record_feedback", r#"{"question": "second"}"#),
                ToolCall::new(
                    "call_c",
                    "record_customer_interest",
                    r#"{"name": "Al", "email": "al@x.com", "message": "hi"}"#,
                ),
            ])),
            Ok(Completion::text("Done.")),
        ]);

        f.assistant.reply("Two questions and a signup", &[]).await;

        let feedback = ledger_lines(&f.ledger, LedgerKind::Feedback);
        assert_eq!(feedback[0]["question"], "first");
        assert_eq!(feedback[1]["question"], "second");
        assert_eq!(ledger_lines(&f.ledger, LedgerKind::Leads).len(), 1);

        let followup = &f.client.requests()[1].0;
        let results: Vec<(Option<&str>, &str)> = followup[3..]
            .iter()
            .map(|m| (m.tool_call_id.as_deref(), m.text()))
            .collect();
        assert_eq!(
            results,
            vec![
                (Some("call_b"), FEEDBACK_CONFIRMATION),
                (Some("call_a"), FEEDBACK_CONFIRMATION),
                (Some("call_c"), LEAD_CONFIRMATION),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_argument_becomes_error_result() {
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![ToolCall::new(
                "call_1",
                "record_customer_interest",
                r#"{"name": "Jo"}"#,
            )])),
            Ok(Completion::text("Could you share your email?")),
        ]);

        let reply = f.assistant.reply("Sign me up", &[]).await;
        assert_eq!(reply, "Could you share your email?");

        let tool_msg = f.client.requests()[1].0.last().cloned().unwrap();
        assert!(tool_msg
            .text()
            .starts_with("Error: invalid arguments for record_customer_interest"));
        assert_no_ledger_writes(&f.ledger);
    }

    #[tokio::test]
    async fn test_second_round_tool_requests_are_dropped() {
        let f = fixture(vec![
            Ok(Completion::tool_calls(vec![ToolCall::new(
                "call_1",
                "record_feedback",
                r#"{"question": "gluten free?"}"#,
            )])),
            Ok(Completion {
                content: Some("Noted!".to_string()),
                tool_calls: vec![ToolCall::new("call_2", "record_feedback", r#"{"question": "again"}"#)],
            }),
        ]);

        let reply = f.assistant.reply("gluten free?", &[]).await;

        assert_eq!(reply, "Noted!");
        assert_eq!(f.client.requests().len(), 2);
        assert_eq!(ledger_lines(&f.ledger, LedgerKind::Feedback).len(), 1);
    }

    #[tokio::test]
    async fn test_ledger_write_failure_becomes_error_result() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let client = ScriptedClient::new(vec![
            Ok(Completion::tool_calls(vec![ToolCall::new(
                "call_1",
                "record_feedback",
                r#"{"question": "Do you cater weddings?"}"#,
            )])),
            Ok(Completion::text("I'll pass that on to the team.")),
        ]);
        let assistant = Assistant::new(
            client.clone(),
            ToolRegistry::with_builtins(Ledger::new(&blocker)),
            "You are a bakery assistant.",
        );

        let reply = assistant.reply("Do you cater weddings?", &[]).await;
        assert_eq!(reply, "I'll pass that on to the team.");

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        let tool_msg = requests[1].0.last().cloned().unwrap();
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_1"));
        assert!(tool_msg
            .text()
            .starts_with("Error: failed to write feedback ledger"));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_reply() {
        let f = fixture(vec![Ok(Completion::default())]);
        assert_eq!(f.assistant.reply("...", &[]).await, "");
    }
}
