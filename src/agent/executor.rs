use std::{
    collections::{HashMap, HashSet},
    pin::Pin,
    sync::Arc,
};

use async_openai::types::ChatCompletionTool;
use async_stream::stream;
use futures_util::{Stream, StreamExt};
use serde_json::{Map, Value};

use crate::{
    agent::{prompt::build_system_prompt, AgentConfig, RunInput},
    completion::{CompletionClient, CompletionDelta, CompletionResponse},
    schemas::{
        AgentEvent, ExecutionLogEntry, Integration, Message, RunResult, TokenUsage, ToolCall,
        ToolCallResult,
    },
    tools::{ToolContext, ToolError, ToolRegistry},
    utils::helper::normalize_tool_name,
};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Final response when a provider call fails mid-run. The real cause goes to
/// the log, not to the user.
pub const COMPLETION_FAILURE_RESPONSE: &str =
    "I apologize, but I encountered an error while processing your request. Please try again.";

/// Final response when the model returns neither content nor tool calls.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I was unable to produce a response for that request. Please try rephrasing it.";

/// First line of the degraded summary returned when a run hits its
/// iteration ceiling.
pub const STEP_LIMIT_PREAMBLE: &str =
    "I reached the step limit before finishing. Here is what was accomplished:";

/// The bounded completion-execute-reinject loop. Construct one per request;
/// it owns no cross-run state.
pub struct AgentExecutor {
    client: Box<dyn CompletionClient>,
    registry: Arc<ToolRegistry>,
    config: AgentConfig,
    max_iterations: usize,
}

/// Mutable state of one run: the growing transcript, accumulated state map,
/// audit log, token usage and per-tool call counters.
struct RunState {
    messages: Vec<Message>,
    tools: Option<Vec<ChatCompletionTool>>,
    available: HashSet<String>,
    state: Map<String, Value>,
    log: Vec<ExecutionLogEntry>,
    usage: Option<TokenUsage>,
    use_counts: HashMap<String, usize>,
    user_id: String,
    integrations: Vec<Integration>,
    request_context: Value,
}

impl RunState {
    fn merge_usage(&mut self, usage: Option<TokenUsage>) {
        self.usage = match (self.usage.take(), usage) {
            (None, usage) => usage,
            (total, None) => total,
            (Some(total), Some(usage)) => Some(total.merge(&usage)),
        };
    }

    /// The assistant turn lands in the transcript even when it carries only
    /// tool calls; the model must see its own calls on the next round.
    fn push_assistant_turn(&mut self, response: &CompletionResponse) {
        let content = response.content.clone().unwrap_or_default();
        let turn = if response.has_tool_calls() {
            Message::new_tool_call_message(content, response.tool_calls.clone())
        } else {
            Message::new_ai_message(content)
        };
        self.messages.push(turn);
    }

    fn push_tool_turn(&mut self, result: &ToolCallResult) {
        self.messages.push(Message::new_tool_message(
            &result.tool_call_id,
            result.to_content(),
        ));
    }

    fn into_result(self, response: String) -> RunResult {
        RunResult {
            response,
            execution_log: self.log,
            state: self.state,
            usage: self.usage,
        }
    }
}

impl AgentExecutor {
    pub fn new(
        client: impl Into<Box<dyn CompletionClient>>,
        registry: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            client: client.into(),
            registry,
            config,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Runs the loop to completion. Infallible by design: provider failures,
    /// tool failures and the iteration ceiling all degrade into response
    /// text instead of errors.
    pub async fn run(&self, input: RunInput) -> RunResult {
        let mut run = self.prepare(input);

        for iteration in 1..=self.max_iterations as u32 {
            let response = match self
                .client
                .complete(run.messages.clone(), run.tools.clone())
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    log::error!("Completion call failed on iteration {iteration}: {e}");
                    run.log
                        .push(ExecutionLogEntry::failed(iteration, e.to_string()));
                    return run.into_result(COMPLETION_FAILURE_RESPONSE.into());
                }
            };

            run.merge_usage(response.usage.clone());
            run.push_assistant_turn(&response);

            if !response.has_tool_calls() {
                return run.into_result(final_text(response));
            }

            let mut entry = ExecutionLogEntry::new(iteration);
            for call in &response.tool_calls {
                let result = self.execute_call(&mut run, call).await;
                run.push_tool_turn(&result);
                entry.record(result.tool_name.clone(), result.success);
            }
            run.log.push(entry);
        }

        log::warn!(
            "Agent {} hit the iteration ceiling ({})",
            self.config.name,
            self.max_iterations
        );
        let summary = step_limit_summary(&run.log);
        run.into_result(summary)
    }

    /// Streaming variant of [`run`]: forwards content as it arrives and
    /// emits typed events, closing with exactly one of `Complete`,
    /// `MaxIterations` or `Error`. Dropping the stream cancels whatever call
    /// is in flight.
    ///
    /// [`run`]: AgentExecutor::run
    pub fn run_streaming(
        &self,
        input: RunInput,
    ) -> Pin<Box<dyn Stream<Item = AgentEvent> + Send + '_>> {
        Box::pin(stream! {
            let mut run = self.prepare(input);

            for iteration in 1..=self.max_iterations as u32 {
                let mut completion = match self
                    .client
                    .stream(run.messages.clone(), run.tools.clone())
                    .await
                {
                    Ok(completion) => completion,
                    Err(e) => {
                        log::error!("Completion call failed on iteration {iteration}: {e}");
                        yield AgentEvent::Error { error: COMPLETION_FAILURE_RESPONSE.into() };
                        return;
                    }
                };

                let mut finished = None;
                while let Some(delta) = completion.next().await {
                    match delta {
                        Ok(CompletionDelta::Content(content)) => {
                            yield AgentEvent::Content { content };
                        }
                        Ok(CompletionDelta::Done(response)) => {
                            finished = Some(response);
                            break;
                        }
                        Err(e) => {
                            log::error!("Completion stream failed on iteration {iteration}: {e}");
                            yield AgentEvent::Error { error: COMPLETION_FAILURE_RESPONSE.into() };
                            return;
                        }
                    }
                }

                let response = match finished {
                    Some(response) => response,
                    None => {
                        log::error!("Completion stream ended without a final aggregate");
                        yield AgentEvent::Error { error: COMPLETION_FAILURE_RESPONSE.into() };
                        return;
                    }
                };

                run.merge_usage(response.usage.clone());
                run.push_assistant_turn(&response);

                if !response.has_tool_calls() {
                    yield AgentEvent::Complete { response: final_text(response) };
                    return;
                }

                yield AgentEvent::ToolStart {
                    tools: response
                        .tool_calls
                        .iter()
                        .map(|call| normalize_tool_name(&call.name))
                        .collect(),
                };

                let mut entry = ExecutionLogEntry::new(iteration);
                for call in &response.tool_calls {
                    let result = self.execute_call(&mut run, call).await;
                    run.push_tool_turn(&result);
                    entry.record(result.tool_name.clone(), result.success);
                    yield AgentEvent::ToolResult {
                        tool: result.tool_name.clone(),
                        result,
                    };
                }
                run.log.push(entry);
            }

            log::warn!(
                "Agent {} hit the iteration ceiling ({})",
                self.config.name,
                self.max_iterations
            );
            yield AgentEvent::MaxIterations { log: run.log };
        })
    }

    /// Resolves the tool view for this run and seeds the transcript. The
    /// system prompt is rebuilt here on every run, so config or registry
    /// changes take effect on the next request.
    fn prepare(&self, input: RunInput) -> RunState {
        let available = self
            .registry
            .available(&self.config.enabled_tools, &input.integrations);

        let definitions: Vec<_> = available.iter().map(|tool| tool.as_openai_tool()).collect();
        let descriptions: Vec<_> = available
            .iter()
            .map(|tool| tool.to_plain_description())
            .collect();
        let names: HashSet<String> = available
            .iter()
            .map(|tool| normalize_tool_name(&tool.name()))
            .collect();

        let system_prompt = build_system_prompt(&self.config, &descriptions);
        log::debug!("\nSystem prompt for agent {}:\n{system_prompt}", self.config.name);

        let mut messages = Vec::with_capacity(input.history.len() + 2);
        messages.push(Message::new_system_message(system_prompt));
        messages.extend(input.history);
        messages.push(Message::new_human_message(input.message));

        RunState {
            messages,
            tools: (!definitions.is_empty()).then_some(definitions),
            available: names,
            state: Map::new(),
            log: Vec::new(),
            usage: None,
            use_counts: HashMap::new(),
            user_id: input.user_id,
            integrations: input.integrations,
            request_context: input.request_context,
        }
    }

    /// Executes one requested call. Every failure mode lands in the returned
    /// result; nothing here aborts the rest of the batch.
    async fn execute_call(&self, run: &mut RunState, call: &ToolCall) -> ToolCallResult {
        log::debug!("\nTool call:\n{call}");
        let tool_name = normalize_tool_name(&call.name);

        if !run.available.contains(&tool_name) {
            log::warn!("Model requested unavailable tool '{}'", call.name);
            return ToolCallResult::failure(
                &call.id,
                &tool_name,
                ToolError::ToolNotFound(tool_name.clone()),
            );
        }

        if let Some(limit) = self
            .registry
            .get(&tool_name)
            .and_then(|tool| tool.usage_limit())
        {
            let count = run.use_counts.entry(tool_name.clone()).or_insert(0);
            *count += 1;
            if *count > limit {
                log::warn!("Tool '{tool_name}' usage limit reached ({limit})");
                return ToolCallResult::failure(
                    &call.id,
                    &tool_name,
                    ToolError::UsageLimitExceeded {
                        tool: tool_name.clone(),
                        limit,
                    },
                );
            }
        }

        let args = match call.parse_arguments() {
            Ok(args) => args,
            Err(e) => {
                log::warn!("Tool '{tool_name}' received malformed arguments: {e}");
                return ToolCallResult::failure(&call.id, &tool_name, ToolError::InputParseError(e));
            }
        };

        let context = ToolContext {
            user_id: run.user_id.clone(),
            integrations: run.integrations.clone(),
            state: run.state.clone(),
            request_context: run.request_context.clone(),
        };

        match self.registry.execute(&tool_name, args, &context).await {
            Ok(output) => {
                log::debug!("\nTool {tool_name} result:\n{output}");
                if let Some(updates) = output.state_updates {
                    run.state.extend(updates);
                }
                ToolCallResult::success(&call.id, &tool_name, output.result)
            }
            Err(e) => {
                log::warn!("Tool '{tool_name}' error: {e}");
                ToolCallResult::failure(&call.id, &tool_name, e)
            }
        }
    }
}

fn final_text(response: CompletionResponse) -> String {
    match response.content {
        Some(content) if !content.is_empty() => content,
        _ => {
            log::warn!("Model returned neither content nor tool calls, substituting fallback text");
            EMPTY_RESPONSE_FALLBACK.into()
        }
    }
}

fn step_limit_summary(log: &[ExecutionLogEntry]) -> String {
    let mut lines = vec![STEP_LIMIT_PREAMBLE.to_string()];
    for entry in log {
        for outcome in &entry.results {
            lines.push(format!(
                "- step {}: {} {}",
                entry.iteration,
                outcome.tool,
                if outcome.success { "succeeded" } else { "failed" }
            ));
        }
        if let Some(error) = &entry.error {
            lines.push(format!("- step {}: error: {}", entry.iteration, error));
        }
    }
    lines.join("\n")
}
