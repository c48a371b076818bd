use std::{io::Write, sync::Arc};

use agentloop::{
    agent::{AgentConfig, AgentExecutor, RunInput},
    completion::OpenAIChat,
    schemas::AgentEvent,
    tools::ToolRegistry,
};
use futures::StreamExt;

#[tokio::main]
async fn main() {
    let executor = AgentExecutor::new(
        OpenAIChat::default(),
        Arc::new(ToolRegistry::new()),
        AgentConfig::new("Demo Agent"),
    );

    let mut stream = executor.run_streaming(RunInput::new(
        "Write a short haiku about borrow checking.",
    ));

    while let Some(event) = stream.next().await {
        match event {
            AgentEvent::Content { content } => {
                print!("{content}");
                std::io::stdout().flush().unwrap();
            }
            AgentEvent::ToolStart { tools } => println!("[calling {}]", tools.join(", ")),
            AgentEvent::ToolResult { tool, result } => {
                println!("[{tool} {}]", if result.success { "ok" } else { "failed" })
            }
            AgentEvent::Complete { .. } => println!(),
            AgentEvent::MaxIterations { .. } => println!("[hit the step limit]"),
            AgentEvent::Error { error } => panic!("Run failed: {error}"),
        }
    }
}
