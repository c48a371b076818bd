use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub tool: String,
    pub success: bool,
}

impl ToolOutcome {
    pub fn new(tool: impl Into<String>, success: bool) -> Self {
        Self {
            tool: tool.into(),
            success,
        }
    }
}

/// One audit record per loop iteration that used tools or failed outright.
/// Iterations that end in a plain answer leave no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    /// 1-based position of the iteration within the run.
    pub iteration: u32,
    pub tool_calls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ToolOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionLogEntry {
    pub fn new(iteration: u32) -> Self {
        Self {
            iteration,
            tool_calls: Vec::new(),
            results: Vec::new(),
            error: None,
        }
    }

    pub fn failed(iteration: u32, error: impl Into<String>) -> Self {
        Self {
            iteration,
            tool_calls: Vec::new(),
            results: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Appends one call outcome, keeping `tool_calls` and `results` aligned.
    pub fn record(&mut self, tool: impl Into<String>, success: bool) {
        let tool = tool.into();
        self.tool_calls.push(tool.clone());
        self.results.push(ToolOutcome::new(tool, success));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sections_are_omitted_from_json() {
        let entry = ExecutionLogEntry::failed(3, "provider unreachable");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "iteration": 3,
                "tool_calls": [],
                "error": "provider unreachable"
            })
        );
    }

    #[test]
    fn record_keeps_calls_and_results_aligned() {
        let mut entry = ExecutionLogEntry::new(1);
        entry.record("get_weather", true);
        entry.record("send_email", false);
        assert_eq!(entry.tool_calls, vec!["get_weather", "send_email"]);
        assert_eq!(
            entry.results,
            vec![
                ToolOutcome::new("get_weather", true),
                ToolOutcome::new("send_email", false)
            ]
        );
    }
}
