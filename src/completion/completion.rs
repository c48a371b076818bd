use std::pin::Pin;

use async_openai::types::ChatCompletionTool;
use async_trait::async_trait;
use futures::Stream;

use crate::{
    completion::{CompletionDelta, CompletionError, CompletionResponse},
    schemas::Message,
};

pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<CompletionDelta, CompletionError>> + Send>>;

/// Provider boundary. One conversation plus optional tool declarations in,
/// one finished turn (or a stream of increments) out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<ChatCompletionTool>>,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Streams zero or more `Content` deltas followed by exactly one `Done`
    /// carrying the aggregated turn.
    async fn stream(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<ChatCompletionTool>>,
    ) -> Result<CompletionStream, CompletionError>;

    /// One-shot prompt without tools, for callers that only want text back.
    async fn invoke(&self, prompt: &str) -> Result<String, CompletionError> {
        let response = self
            .complete(vec![Message::new_human_message(prompt)], None)
            .await?;
        Ok(response.content.unwrap_or_default())
    }
}

impl<C> From<C> for Box<dyn CompletionClient>
where
    C: CompletionClient + 'static,
{
    fn from(client: C) -> Self {
        Box::new(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::MessageType;

    struct CannedClient;

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(
            &self,
            messages: Vec<Message>,
            tools: Option<Vec<ChatCompletionTool>>,
        ) -> Result<CompletionResponse, CompletionError> {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].message_type, MessageType::Human);
            assert!(tools.is_none());
            Ok(CompletionResponse::from_text("pong"))
        }

        async fn stream(
            &self,
            _messages: Vec<Message>,
            _tools: Option<Vec<ChatCompletionTool>>,
        ) -> Result<CompletionStream, CompletionError> {
            unimplemented!("invoke never streams")
        }
    }

    #[test]
    fn invoke_wraps_the_prompt_in_a_human_turn() {
        let answer = tokio_test::block_on(CannedClient.invoke("ping")).unwrap();
        assert_eq!(answer, "pong");
    }
}
