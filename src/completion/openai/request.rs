use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionStreamOptions, ChatCompletionTool,
    ChatCompletionToolChoiceOption,
};
use serde::Serialize;

use crate::{
    completion::{CallOptions, CompletionError},
    schemas::Message,
};

/// Request body for an OpenAI-compatible chat completion endpoint. Built by
/// hand so unsupported knobs never show up on the wire.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub messages: Vec<ChatCompletionRequestMessage>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<ChatCompletionStreamOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ChatCompletionTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ChatCompletionToolChoiceOption>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Result<Self, CompletionError> {
        let messages = messages
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            messages,
            model: model.into(),
            stream: None,
            stream_options: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            stop: None,
            seed: None,
            frequency_penalty: None,
            presence_penalty: None,
            tools: None,
            tool_choice: None,
        })
    }

    pub fn with_options(self, options: &CallOptions) -> Self {
        Self {
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop: options.stop_words.clone(),
            seed: options.seed,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            tool_choice: options.tool_choice.clone(),
            ..self
        }
    }

    pub fn with_tools(self, tools: Option<Vec<ChatCompletionTool>>) -> Self {
        Self { tools, ..self }
    }

    /// Usage arrives on the last chunk only when explicitly requested.
    pub fn streaming(self) -> Self {
        Self {
            stream: Some(true),
            stream_options: Some(ChatCompletionStreamOptions {
                include_usage: true,
            }),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_stay_off_the_wire() {
        let request =
            ChatRequest::new("gpt-4o-mini", vec![Message::new_human_message("hi")]).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], json!("gpt-4o-mini"));
        assert_eq!(body["messages"][0]["role"], json!("user"));
        assert!(body.get("temperature").is_none());
        assert!(body.get("tools").is_none());
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn streaming_requests_ask_for_usage() {
        let request = ChatRequest::new("gpt-4o-mini", vec![Message::new_human_message("hi")])
            .unwrap()
            .streaming();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["stream"], json!(true));
        assert_eq!(body["stream_options"]["include_usage"], json!(true));
    }

    #[test]
    fn options_land_in_the_body() {
        let options = CallOptions::new()
            .with_temperature(0.2)
            .with_max_tokens(256)
            .with_stop_words(vec!["<END>".into()]);
        let request = ChatRequest::new("gpt-4o-mini", vec![Message::new_human_message("hi")])
            .unwrap()
            .with_options(&options);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["max_tokens"], json!(256));
        assert_eq!(body["stop"], json!(["<END>"]));
    }
}
