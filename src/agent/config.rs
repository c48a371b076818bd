use serde::{Deserialize, Serialize};

use crate::tools::ToolSelection;

/// Caller-supplied agent definition. The executor reads it, never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub enabled_tools: ToolSelection,
    /// Replaces the default persona line when set. The capability listing
    /// and behavioral directives are appended either way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled_tools: ToolSelection::All,
            system_prompt: None,
        }
    }

    pub fn with_enabled_tools(mut self, enabled_tools: ToolSelection) -> Self {
        self.enabled_tools = enabled_tools;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enabled_tools_default_to_all() {
        let config: AgentConfig = serde_json::from_value(json!({ "name": "Helper" })).unwrap();
        assert_eq!(config.enabled_tools, ToolSelection::All);
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn deserializes_an_explicit_tool_list() {
        let config: AgentConfig = serde_json::from_value(json!({
            "name": "Coder",
            "enabled_tools": ["execute_code"],
            "system_prompt": "You are a coding assistant."
        }))
        .unwrap();
        assert_eq!(config.enabled_tools, ToolSelection::only(["execute_code"]));
        assert_eq!(config.system_prompt.as_deref(), Some("You are a coding assistant."));
    }
}
