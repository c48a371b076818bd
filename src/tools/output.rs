use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a tool hands back: a structured result plus optional key-value side
/// effects merged into the run's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_updates: Option<Map<String, Value>>,
}

impl ToolOutput {
    pub fn new(result: Value) -> Self {
        Self {
            result,
            state_updates: None,
        }
    }

    pub fn with_state_updates(mut self, state_updates: Map<String, Value>) -> Self {
        self.state_updates = Some(state_updates);
        self
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        Self::new(Value::String(value))
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        Self::new(Value::String(value.into()))
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.result)
    }
}
