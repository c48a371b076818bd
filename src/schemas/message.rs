use std::fmt;

use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    },
};
use serde::{Deserialize, Serialize};

use crate::schemas::ToolCall;

#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone)]
pub enum MessageType {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "tool")]
    Tool,
}

impl Default for MessageType {
    fn default() -> Self {
        Self::System
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::System => write!(f, "system"),
            MessageType::Ai => write!(f, "ai"),
            MessageType::Human => write!(f, "human"),
            MessageType::Tool => write!(f, "tool"),
        }
    }
}

/// A single conversation turn. Tool turns carry the id of the call they
/// answer; assistant turns may carry the calls they requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_type: MessageType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    pub fn new(message_type: MessageType, content: impl Into<String>) -> Self {
        Self {
            message_type,
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    pub fn new_system_message(content: impl Into<String>) -> Self {
        Self::new(MessageType::System, content)
    }

    pub fn new_human_message(content: impl Into<String>) -> Self {
        Self::new(MessageType::Human, content)
    }

    pub fn new_ai_message(content: impl Into<String>) -> Self {
        Self::new(MessageType::Ai, content)
    }

    /// Assistant turn that requested tool calls. Content may be empty; the
    /// turn still has to land in the transcript so the model sees its own
    /// calls on the next round.
    pub fn new_tool_call_message(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            message_type: MessageType::Ai,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Some(tool_calls),
        }
    }

    /// Tool turn answering the call with the given id.
    pub fn new_tool_message(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            tool_calls: None,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message_type, self.content)?;
        if let Some(tool_calls) = &self.tool_calls {
            for tool_call in tool_calls {
                write!(f, "\n  {}", tool_call)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<Message> for ChatCompletionRequestMessage {
    type Error = OpenAIError;

    fn try_from(message: Message) -> Result<Self, Self::Error> {
        match message.message_type {
            MessageType::System => Ok(ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content)
                .build()?
                .into()),
            MessageType::Human => Ok(ChatCompletionRequestUserMessageArgs::default()
                .content(message.content)
                .build()?
                .into()),
            MessageType::Ai => {
                let mut args = ChatCompletionRequestAssistantMessageArgs::default();
                if !message.content.is_empty() {
                    args.content(message.content);
                }
                if let Some(tool_calls) = message.tool_calls {
                    if !tool_calls.is_empty() {
                        args.tool_calls(
                            tool_calls
                                .into_iter()
                                .map(Into::into)
                                .collect::<Vec<ChatCompletionMessageToolCall>>(),
                        );
                    }
                }
                Ok(args.build()?.into())
            }
            MessageType::Tool => {
                let tool_call_id = message.tool_call_id.ok_or_else(|| {
                    OpenAIError::InvalidArgument(
                        "tool message is missing its tool_call_id".into(),
                    )
                })?;
                Ok(ChatCompletionRequestToolMessageArgs::default()
                    .content(message.content)
                    .tool_call_id(tool_call_id)
                    .build()?
                    .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MessageType::Ai).unwrap(), json!("ai"));
        assert_eq!(
            serde_json::to_value(MessageType::Human).unwrap(),
            json!("human")
        );
    }

    #[test]
    fn tool_message_carries_its_call_id() {
        let message = Message::new_tool_message("call_1", "{\"success\":true}");
        assert_eq!(message.message_type, MessageType::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn tool_message_without_call_id_is_rejected() {
        let message = Message {
            message_type: MessageType::Tool,
            content: "orphan".into(),
            tool_call_id: None,
            tool_calls: None,
        };
        let converted: Result<ChatCompletionRequestMessage, _> = message.try_into();
        assert!(converted.is_err());
    }

    #[test]
    fn assistant_turn_keeps_tool_calls_on_the_wire() {
        let message = Message::new_tool_call_message(
            "",
            vec![ToolCall::new("call_1", "search_web", "{\"query\":\"rust\"}")],
        );
        let converted: ChatCompletionRequestMessage = message.try_into().unwrap();
        match converted {
            ChatCompletionRequestMessage::Assistant(assistant) => {
                let calls = assistant.tool_calls.unwrap();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].id, "call_1");
                assert_eq!(calls[0].function.name, "search_web");
            }
            other => panic!("expected an assistant message, got {:?}", other),
        }
    }
}
