//! Lead capture tool: records a customer's contact details in the leads ledger.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_input, Tool};
use crate::constants::LEAD_CONFIRMATION;
use crate::error::ToolError;
use crate::ledger::{timestamp_now, LeadEntry, Ledger, LedgerKind};

pub struct RecordCustomerInterest {
    ledger: Ledger,
}

impl RecordCustomerInterest {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }
}

#[derive(Deserialize)]
struct CustomerInterestInput {
    email: String,
    name: String,
    message: String,
}

#[async_trait::async_trait]
impl Tool for RecordCustomerInterest {
    fn name(&self) -> &str {
        "record_customer_interest"
    }

    fn description(&self) -> &str {
        "Record a new lead for the bakery."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "email": {"type": "string"},
                "name": {"type": "string"},
                "message": {"type": "string"}
            },
            "required": ["email", "name", "message"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let input: CustomerInterestInput = parse_input(self.name(), input)?;
        let entry = LeadEntry {
            timestamp: timestamp_now(),
            name: input.name,
            email: input.email,
            message: input.message,
        };
        self.ledger
            .append(LedgerKind::Leads, &entry)
            .map_err(|source| ToolError::Ledger {
                ledger: LedgerKind::Leads.as_str(),
                source,
            })?;
        tracing::info!(email = %entry.email, "lead recorded");
        Ok(LEAD_CONFIRMATION.to_string())
    }
}
