use serde_json::Value;

use crate::schemas::{Integration, Message};

/// Everything one run needs from the caller: prior turns (oldest first), the
/// new user message, and the request-scoped pass-through data.
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    pub history: Vec<Message>,
    pub message: String,
    pub user_id: String,
    pub integrations: Vec<Integration>,
    /// Opaque caller data surfaced to tools through their context.
    pub request_context: Value,
}

impl RunInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_integrations(mut self, integrations: Vec<Integration>) -> Self {
        self.integrations = integrations;
        self
    }

    pub fn with_request_context(mut self, request_context: Value) -> Self {
        self.request_context = request_context;
        self
    }
}
