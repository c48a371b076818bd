use async_openai::{
    error::OpenAIError,
    types::{
        ChatChoiceStream, ChatCompletionMessageToolCall, ChatCompletionResponseMessage,
        ChatCompletionToolType, CreateChatCompletionStreamResponse, FunctionCall, Role,
    },
};
use async_stream::stream;
use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::{
    completion::{CompletionDelta, CompletionResponse, CompletionStream},
    schemas::TokenUsage,
};

#[allow(deprecated)]
fn empty_message() -> ChatCompletionResponseMessage {
    ChatCompletionResponseMessage {
        content: None,
        refusal: None,
        tool_calls: None,
        role: Role::Assistant,
        function_call: None,
        audio: None,
    }
}

/// Folds one chunk choice into the message under assembly. Tool-call
/// fragments are keyed by `index`; argument text is concatenated in arrival
/// order and never parsed here, since fragments split mid-JSON.
fn aggregate_delta(message: &mut ChatCompletionResponseMessage, choice: ChatChoiceStream) {
    let delta = choice.delta;

    if let Some(role) = delta.role {
        message.role = role;
    }

    if let Some(content) = delta.content {
        message
            .content
            .get_or_insert_with(String::new)
            .push_str(&content);
    }

    if let Some(refusal) = delta.refusal {
        message
            .refusal
            .get_or_insert_with(String::new)
            .push_str(&refusal);
    }

    if let Some(chunks) = delta.tool_calls {
        let calls = message.tool_calls.get_or_insert_with(Vec::new);
        for chunk in chunks {
            let idx = chunk.index as usize;
            if calls.len() <= idx {
                calls.resize_with(idx + 1, || ChatCompletionMessageToolCall {
                    id: String::new(),
                    r#type: ChatCompletionToolType::Function,
                    function: FunctionCall {
                        name: String::new(),
                        arguments: String::new(),
                    },
                });
            }

            let call = &mut calls[idx];
            if let Some(id) = chunk.id {
                call.id = id;
            }
            if let Some(r#type) = chunk.r#type {
                call.r#type = r#type;
            }
            if let Some(function) = chunk.function {
                if let Some(name) = function.name {
                    call.function.name = name;
                }
                if let Some(arguments) = function.arguments {
                    call.function.arguments.push_str(&arguments);
                }
            }
        }
    }

    #[allow(deprecated)]
    if let Some(function_call) = delta.function_call {
        let call = message.function_call.get_or_insert(FunctionCall {
            name: String::new(),
            arguments: String::new(),
        });
        if let Some(name) = function_call.name {
            call.name = name;
        }
        if let Some(arguments) = function_call.arguments {
            call.arguments.push_str(&arguments);
        }
    }
}

/// Adapts a raw chunk stream into [`CompletionDelta`]s: content is forwarded
/// the moment it arrives, everything else is aggregated into the final
/// `Done`. A provider error ends the stream without one.
pub fn delta_stream<S>(chunks: S) -> CompletionStream
where
    S: Stream<Item = Result<CreateChatCompletionStreamResponse, OpenAIError>>
        + Send
        + Unpin
        + 'static,
{
    Box::pin(stream! {
        let mut chunks = chunks;
        let mut message = empty_message();
        let mut usage: Option<TokenUsage> = None;

        while let Some(chunk) = chunks.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            usage = match (usage, chunk.usage.map(TokenUsage::from)) {
                (None, chunk_usage) => chunk_usage,
                (total, None) => total,
                (Some(total), Some(chunk_usage)) => Some(total.merge(&chunk_usage)),
            };

            for choice in chunk.choices {
                if let Some(content) = choice.delta.content.as_deref() {
                    if !content.is_empty() {
                        yield Ok(CompletionDelta::Content(content.to_string()));
                    }
                }
                aggregate_delta(&mut message, choice);
            }
        }

        // Providers occasionally omit ids on streamed calls.
        if let Some(calls) = message.tool_calls.as_mut() {
            for call in calls.iter_mut() {
                if call.id.is_empty() {
                    call.id = Uuid::new_v4().to_string();
                }
            }
        }

        yield Ok(CompletionDelta::Done(CompletionResponse::from_message(message, usage)));
    })
}
