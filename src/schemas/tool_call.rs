use std::fmt::{self, Display};

use async_openai::types::{ChatCompletionMessageToolCall, ChatCompletionToolType, FunctionCall};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Argument text exactly as the model produced it. Parsing is deferred
    /// so a malformed payload fails only the call it belongs to, at
    /// execution time.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Some providers call zero-parameter tools with an empty argument
    /// string, which counts as an empty object rather than a parse failure.
    pub fn parse_arguments(&self) -> Result<Value, serde_json::Error> {
        if self.arguments.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.arguments)
    }
}

impl From<ChatCompletionMessageToolCall> for ToolCall {
    fn from(value: ChatCompletionMessageToolCall) -> Self {
        Self {
            id: value.id,
            name: value.function.name,
            arguments: value.function.arguments,
        }
    }
}

impl From<ToolCall> for ChatCompletionMessageToolCall {
    fn from(value: ToolCall) -> Self {
        Self {
            id: value.id,
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: value.name,
                arguments: value.arguments,
            },
        }
    }
}

impl From<FunctionCall> for ToolCall {
    fn from(value: FunctionCall) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: value.name,
            arguments: value.arguments,
        }
    }
}

impl From<ToolCall> for FunctionCall {
    fn from(value: ToolCall) -> Self {
        Self {
            name: value.name,
            arguments: value.arguments,
        }
    }
}

impl Serialize for ToolCall {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let openai_rep: ChatCompletionMessageToolCall = self.clone().into();
        openai_rep.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ToolCall {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let openai_rep = ChatCompletionMessageToolCall::deserialize(deserializer)?;
        Ok(openai_rep.into())
    }
}

impl Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
