use async_openai::types::ChatCompletionResponseMessage;

use crate::schemas::{TokenUsage, ToolCall};

/// A finished model turn: prose, tool-call requests, or both. When
/// `tool_calls` is non-empty the content is kept for the transcript but is
/// not treated as a final answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            usage: None,
        }
    }

    pub fn from_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Collapses the wire message into our shape. Refusals become plain
    /// content; legacy `function_call` payloads become a single tool call.
    pub(crate) fn from_message(
        message: ChatCompletionResponseMessage,
        usage: Option<TokenUsage>,
    ) -> Self {
        let mut tool_calls: Vec<ToolCall> = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        #[allow(deprecated)]
        if tool_calls.is_empty() {
            if let Some(function_call) = message.function_call {
                tool_calls.push(function_call.into());
            }
        }

        Self {
            content: message.content.or(message.refusal),
            tool_calls,
            usage,
        }
    }
}

/// One streamed increment. `Content` fragments arrive as produced; the final
/// `Done` carries the fully aggregated turn, assembled tool calls included.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionDelta {
    Content(String),
    Done(CompletionResponse),
}
