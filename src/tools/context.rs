use serde_json::{Map, Value};

use crate::schemas::Integration;

/// Request-scoped data handed to every tool call: who is asking, what is
/// connected, the run's accumulated state, and the caller's opaque context.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub user_id: String,
    pub integrations: Vec<Integration>,
    /// Snapshot of the run's state map at call time. Writes go through
    /// [`ToolOutput::state_updates`], never through this snapshot.
    ///
    /// [`ToolOutput::state_updates`]: crate::tools::ToolOutput::state_updates
    pub state: Map<String, Value>,
    pub request_context: Value,
}

impl ToolContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_integrations(mut self, integrations: Vec<Integration>) -> Self {
        self.integrations = integrations;
        self
    }

    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = state;
        self
    }

    pub fn with_request_context(mut self, request_context: Value) -> Self {
        self.request_context = request_context;
        self
    }

    pub fn has_integration(&self, integration_type: &str) -> bool {
        self.integrations
            .iter()
            .any(|integration| integration.integration_type == integration_type)
    }
}
