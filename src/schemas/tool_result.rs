use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Outcome of one tool invocation, correlated to the call that requested it.
/// Failures carry an `{"error": ...}` object so the model can react to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub success: bool,
    pub output: Value,
}

impl ToolCallResult {
    pub fn success(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            success: true,
            output,
        }
    }

    pub fn failure(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            success: false,
            output: json!({ "error": error.to_string() }),
        }
    }

    /// Content of the tool turn fed back to the model.
    pub fn to_content(&self) -> String {
        json!({ "success": self.success, "output": self.output }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_wrap_the_error_message() {
        let result = ToolCallResult::failure("call_1", "send_email", "no account connected");
        assert!(!result.success);
        assert_eq!(result.output, json!({ "error": "no account connected" }));
    }

    #[test]
    fn content_round_trips_as_json() {
        let result = ToolCallResult::success("call_1", "get_weather", json!({ "temp_c": 19 }));
        let content: Value = serde_json::from_str(&result.to_content()).unwrap();
        assert_eq!(content, json!({ "success": true, "output": { "temp_c": 19 } }));
    }
}
