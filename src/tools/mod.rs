pub mod customer_interest;
pub mod feedback;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ToolError;
use crate::ledger::Ledger;

use customer_interest::RecordCustomerInterest;
use feedback::RecordFeedback;

/// Definition sent to the model so it knows what tools are available.
///
/// Serializes to the chat-completions function-tool shape:
/// `{"type": "function", "function": {name, description, parameters}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// Every tool implements this trait.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Human-readable description sent alongside the schema.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn schema(&self) -> Value;

    /// Run the tool and return a short confirmation for the model.
    async fn execute(&self, input: Value) -> Result<String, ToolError>;
}

/// Holds all registered tools and dispatches calls by name.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Called during startup.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(Arc::from(tool));
    }

    /// Produce definitions for the model (sent in the API request).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                kind: "function",
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.schema(),
                },
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Look up a tool by name and execute it with the raw JSON argument string.
    ///
    /// An empty argument string is treated as `{}` so the tool reports the
    /// missing fields itself.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;
        let input: Value = if arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(arguments).map_err(|source| ToolError::InvalidArguments {
                tool: name.to_string(),
                source,
            })?
        };
        tool.execute(input).await
    }

    /// How many tools are registered.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a registry with the bakery's two tools writing into `ledger`.
    pub fn with_builtins(ledger: Ledger) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RecordCustomerInterest::new(ledger.clone())));
        registry.register(Box::new(RecordFeedback::new(ledger)));
        registry
    }
}

/// Decodes a tool's JSON input into its typed argument struct.
pub(crate) fn parse_input<T: serde::de::DeserializeOwned>(
    tool: &str,
    input: Value,
) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}
