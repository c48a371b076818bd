use std::{fmt, time::Duration};

pub use async_openai::config::{AzureConfig, Config, OpenAIConfig};

use async_openai::{
    types::{
        ChatChoice, ChatCompletionTool, CreateChatCompletionResponse,
        CreateChatCompletionStreamResponse, FinishReason,
    },
    Client,
};
use async_trait::async_trait;

use crate::{
    completion::{
        openai::{request::ChatRequest, stream::delta_stream},
        CallOptions, CompletionClient, CompletionError, CompletionResponse, CompletionStream,
    },
    schemas::Message,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum OpenAIModel {
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    Gpt41Nano,
}

impl fmt::Display for OpenAIModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenAIModel::Gpt4o => write!(f, "gpt-4o"),
            OpenAIModel::Gpt4oMini => write!(f, "gpt-4o-mini"),
            OpenAIModel::Gpt41 => write!(f, "gpt-4.1"),
            OpenAIModel::Gpt41Mini => write!(f, "gpt-4.1-mini"),
            OpenAIModel::Gpt41Nano => write!(f, "gpt-4.1-nano"),
        }
    }
}

impl From<OpenAIModel> for String {
    fn from(value: OpenAIModel) -> Self {
        value.to_string()
    }
}

/// Chat backend for OpenAI and OpenAI-compatible endpoints. Everything it
/// needs is injected at construction; nothing is read from ambient state
/// afterwards.
#[derive(Clone)]
pub struct OpenAIChat<C: Config> {
    config: C,
    options: CallOptions,
    model: String,
    http_client: Option<reqwest::Client>,
}

impl<C: Config + Clone> OpenAIChat<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            options: CallOptions::default(),
            model: OpenAIModel::Gpt4oMini.to_string(),
            http_client: None,
        }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: C) -> Self {
        self.config = config;
        self
    }

    /// Bring your own reqwest client to control proxies, pooling or
    /// request timeouts.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    fn client(&self) -> Result<Client<C>, CompletionError> {
        let http_client = match &self.http_client {
            Some(http_client) => http_client.clone(),
            None => reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()?,
        };
        Ok(Client::with_config(self.config.clone()).with_http_client(http_client))
    }

    fn request(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<ChatCompletionTool>>,
    ) -> Result<ChatRequest, CompletionError> {
        Ok(ChatRequest::new(&self.model, messages)?
            .with_options(&self.options)
            .with_tools(tools))
    }
}

impl Default for OpenAIChat<OpenAIConfig> {
    fn default() -> Self {
        Self::new(OpenAIConfig::default())
    }
}

/// Filtered and truncated choices rank below clean finishes; ties break on
/// index.
fn select_choice(mut choices: Vec<ChatChoice>) -> Option<ChatChoice> {
    choices.sort_by_key(|choice| {
        let penalized = matches!(
            choice.finish_reason,
            Some(FinishReason::ContentFilter) | Some(FinishReason::Length)
        );
        (penalized, choice.index)
    });
    choices.into_iter().next()
}

#[async_trait]
impl<C: Config + Clone + Send + Sync> CompletionClient for OpenAIChat<C> {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<ChatCompletionTool>>,
    ) -> Result<CompletionResponse, CompletionError> {
        let client = self.client()?;
        let request = self.request(messages, tools)?;

        let response = client
            .chat()
            .create_byot::<_, CreateChatCompletionResponse>(request)
            .await?;

        let usage = response.usage.map(Into::into);
        let choice = select_choice(response.choices).ok_or_else(|| {
            CompletionError::ContentNotFound("completion returned no choices".into())
        })?;

        Ok(CompletionResponse::from_message(choice.message, usage))
    }

    async fn stream(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<ChatCompletionTool>>,
    ) -> Result<CompletionStream, CompletionError> {
        let client = self.client()?;
        let request = self.request(messages, tools)?.streaming();

        let chunks = client
            .chat()
            .create_stream_byot::<_, CreateChatCompletionStreamResponse>(request)
            .await?;

        Ok(delta_stream(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionDelta;
    use futures::StreamExt;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> OpenAIChat<OpenAIConfig> {
        OpenAIChat::new(
            OpenAIConfig::new()
                .with_api_base(server.url())
                .with_api_key("test"),
        )
    }

    #[tokio::test]
    async fn complete_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-4o-mini",
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": "Hello there" },
                        "finish_reason": "stop",
                        "logprobs": null
                    }],
                    "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .complete(vec![Message::new_human_message("hi")], None)
            .await
            .unwrap();

        assert_eq!(response.content.as_deref(), Some("Hello there"));
        assert!(!response.has_tool_calls());
        assert_eq!(response.usage.unwrap().total_tokens, 12);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_returns_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-2",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-4o-mini",
                    "choices": [{
                        "index": 0,
                        "message": {
                            "role": "assistant",
                            "content": null,
                            "tool_calls": [{
                                "id": "call_1",
                                "type": "function",
                                "function": {
                                    "name": "execute_code",
                                    "arguments": "{\"code\":\"2+2\"}"
                                }
                            }]
                        },
                        "finish_reason": "tool_calls",
                        "logprobs": null
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .complete(vec![Message::new_human_message("compute 2+2")], None)
            .await
            .unwrap();

        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].id, "call_1");
        assert_eq!(response.tool_calls[0].name, "execute_code");
        assert_eq!(response.tool_calls[0].arguments, "{\"code\":\"2+2\"}");
    }

    #[tokio::test]
    async fn complete_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": {
                        "message": "Rate limit reached",
                        "type": "tokens",
                        "param": null,
                        "code": null
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let error = client
            .complete(vec![Message::new_human_message("hi")], None)
            .await
            .unwrap_err();

        assert!(matches!(error, CompletionError::OpenAIError(_)));
    }

    #[tokio::test]
    async fn stream_forwards_content_deltas() {
        let mut server = mockito::Server::new_async().await;
        let body = concat!(
            "data: {\"id\":\"chatcmpl-3\",\"object\":\"chat.completion.chunk\",\"created\":1700000000,\"model\":\"gpt-4o-mini\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"chatcmpl-3\",\"object\":\"chat.completion.chunk\",\"created\":1700000000,\"model\":\"gpt-4o-mini\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"chatcmpl-3\",\"object\":\"chat.completion.chunk\",\"created\":1700000000,\"model\":\"gpt-4o-mini\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n"
        );
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server);
        let mut stream = client
            .stream(vec![Message::new_human_message("hi")], None)
            .await
            .unwrap();

        let mut contents = Vec::new();
        let mut done = None;
        while let Some(delta) = stream.next().await {
            match delta.unwrap() {
                CompletionDelta::Content(text) => contents.push(text),
                CompletionDelta::Done(response) => done = Some(response),
            }
        }

        assert_eq!(contents, vec!["Hel", "lo"]);
        assert_eq!(done.unwrap().content.as_deref(), Some("Hello"));
    }

    #[test]
    fn select_choice_prefers_clean_finishes() {
        fn choice(index: u32, finish_reason: Option<FinishReason>) -> ChatChoice {
            serde_json::from_value(json!({
                "index": index,
                "message": { "role": "assistant", "content": format!("choice {index}") },
                "finish_reason": finish_reason,
                "logprobs": null
            }))
            .unwrap()
        }

        let picked = select_choice(vec![
            choice(0, Some(FinishReason::Length)),
            choice(1, Some(FinishReason::Stop)),
        ])
        .unwrap();
        assert_eq!(picked.index, 1);

        assert!(select_choice(vec![]).is_none());
    }
}
