use std::sync::Arc;

use agentloop::{
    agent::{AgentConfig, AgentExecutor, RunInput},
    completion::OpenAIChat,
    tools::{
        fields::{ObjectField, StringField},
        Tool, ToolContext, ToolError, ToolOutput, ToolRegistry,
    },
};
use async_trait::async_trait;
use serde_json::{json, Value};

struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> String {
        "Get Weather".to_string()
    }

    fn description(&self) -> String {
        "Looks up the current weather for a city".to_string()
    }

    fn parameters(&self) -> ObjectField {
        ObjectField::new_parameters([StringField::new("city")
            .description("City to look up")
            .into()])
    }

    async fn call(&self, args: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::new(json!({
            "city": args["city"],
            "temp_c": 19,
            "sky": "clear"
        })))
    }
}

#[tokio::main]
async fn main() {
    let mut registry = ToolRegistry::new();
    registry.register(WeatherTool);

    let executor = AgentExecutor::new(
        OpenAIChat::default(),
        Arc::new(registry),
        AgentConfig::new("Demo Agent"),
    );

    let result = executor
        .run(RunInput::new("What is the weather in Berlin right now?"))
        .await;

    println!("Response: {}", result.response);
    println!(
        "Steps: {}",
        serde_json::to_string_pretty(&result.execution_log).unwrap()
    );
    if let Some(usage) = result.usage {
        println!("Usage: {usage}");
    }
}
