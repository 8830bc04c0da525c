//! Feedback tool: records questions the assistant could not answer.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::constants::FEEDBACK_CONFIRMATION;
use crate::error::ToolError;
use crate::ledger::{timestamp_now, FeedbackEntry, Ledger, LedgerKind};

pub struct RecordFeedback {
    ledger: Ledger,
}

impl RecordFeedback {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }
}

#[derive(Deserialize)]
struct FeedbackInput {
    question: String,
}

#[async_trait::async_trait]
impl Tool for RecordFeedback {
    fn name(&self) -> &str {
        "record_feedback"
    }

    fn description(&self) -> &str {
        "Record feedback or unknown questions."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {"type": "string"}
            },
            "required": ["question"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: FeedbackInput = parse_input(self.name(), input)?;
        let entry = FeedbackEntry {
            timestamp: timestamp_now(),
            question: input.question,
        };
        self.ledger
            .append(LedgerKind::Feedback, &entry)
            .map_err(|source| ToolError::Ledger {
                ledger: LedgerKind::Feedback.as_str(),
                source,
            })?;
        tracing::info!("feedback recorded");
        Ok(FEEDBACK_CONFIRMATION.to_string())
    }
}
