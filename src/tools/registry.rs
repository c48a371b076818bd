use std::{collections::HashMap, sync::Arc, time::Duration};

use async_openai::types::ChatCompletionTool;
use serde_json::Value;

use crate::{
    schemas::Integration,
    tools::{Tool, ToolContext, ToolError, ToolOutput, ToolSelection},
    utils::helper::normalize_tool_name,
};

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

fn integration_satisfied(tool: &dyn Tool, integrations: &[Integration]) -> bool {
    match tool.integration_requirement() {
        None => true,
        Some(required) => required.iter().any(|required_type| {
            integrations
                .iter()
                .any(|integration| integration.integration_type == *required_type)
        }),
    }
}

/// Name-to-handler map with stable registration order. Declarations are
/// filtered per run by the agent's enabled set and the user's connected
/// integrations; execution is timeout-bounded.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
    default_timeout: Duration,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            default_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_default_timeout(mut self, default_timeout: Duration) -> Self {
        self.default_timeout = default_timeout;
        self
    }

    /// Registers a tool under its normalized name. Re-registering a name
    /// replaces the handler but keeps its original position.
    pub fn register<T>(&mut self, tool: T) -> &mut Self
    where
        T: Tool + 'static,
    {
        let name = normalize_tool_name(&tool.name());
        match self.index.get(&name) {
            Some(&position) => {
                log::warn!("Tool {} registered twice, replacing the handler", name);
                self.tools[position] = Arc::new(tool);
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(Arc::new(tool));
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index
            .get(&normalize_tool_name(name))
            .map(|&position| &self.tools[position])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools visible to one run, in registration order.
    pub fn available(
        &self,
        selection: &ToolSelection,
        integrations: &[Integration],
    ) -> Vec<Arc<dyn Tool>> {
        self.tools
            .iter()
            .filter(|tool| selection.allows(&tool.name()))
            .filter(|tool| integration_satisfied(tool.as_ref(), integrations))
            .cloned()
            .collect()
    }

    /// Wire declarations for the visible subset.
    pub fn definitions(
        &self,
        selection: &ToolSelection,
        integrations: &[Integration],
    ) -> Vec<ChatCompletionTool> {
        self.available(selection, integrations)
            .iter()
            .map(|tool| tool.as_openai_tool())
            .collect()
    }

    /// Plain-text capability listing for the system prompt.
    pub fn descriptions(
        &self,
        selection: &ToolSelection,
        integrations: &[Integration],
    ) -> Vec<String> {
        self.available(selection, integrations)
            .iter()
            .map(|tool| tool.to_plain_description())
            .collect()
    }

    /// Dispatches one call. Unknown names and calls that outlive their
    /// timeout both come back as errors rather than panics or hangs.
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolContext,
    ) -> Result<ToolOutput, ToolError> {
        let Some(tool) = self.get(name) else {
            return Err(ToolError::ToolNotFound(name.into()));
        };

        let timeout = tool.timeout().unwrap_or(self.default_timeout);
        match tokio::time::timeout(timeout, tool.call(args, context)).await {
            Ok(result) => result,
            Err(_) => Err(ToolError::Timeout {
                tool: normalize_tool_name(name),
                timeout,
            }),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
