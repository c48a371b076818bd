use serde::{Deserialize, Serialize};

use crate::schemas::{ExecutionLogEntry, ToolCallResult};

/// Incremental output of a streaming run. Exactly one of `Complete`,
/// `MaxIterations` or `Error` ends the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Content { content: String },
    ToolStart { tools: Vec<String> },
    ToolResult { tool: String, result: ToolCallResult },
    Complete { response: String },
    MaxIterations { log: Vec<ExecutionLogEntry> },
    Error { error: String },
}

impl AgentEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AgentEvent::Complete { .. } | AgentEvent::MaxIterations { .. } | AgentEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_are_tagged_by_type() {
        assert_eq!(
            serde_json::to_value(AgentEvent::Content {
                content: "Hello".into()
            })
            .unwrap(),
            json!({ "type": "content", "content": "Hello" })
        );
        assert_eq!(
            serde_json::to_value(AgentEvent::ToolStart {
                tools: vec!["get_weather".into()]
            })
            .unwrap(),
            json!({ "type": "tool_start", "tools": ["get_weather"] })
        );
        assert_eq!(
            serde_json::to_value(AgentEvent::MaxIterations { log: vec![] }).unwrap(),
            json!({ "type": "max_iterations", "log": [] })
        );
    }

    #[test]
    fn only_the_closing_variants_are_terminal() {
        assert!(AgentEvent::Complete {
            response: "done".into()
        }
        .is_terminal());
        assert!(AgentEvent::Error {
            error: "boom".into()
        }
        .is_terminal());
        assert!(!AgentEvent::Content {
            content: "hi".into()
        }
        .is_terminal());
        assert!(!AgentEvent::ToolStart { tools: vec![] }.is_terminal());
    }
}
