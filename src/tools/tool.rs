use std::time::Duration;

use async_openai::types::{
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType, FunctionObjectArgs,
};
use async_trait::async_trait;
use indoc::formatdoc;
use serde_json::Value;

use crate::{
    tools::{
        fields::{ObjectField, StringField, ToolField},
        ToolContext, ToolError, ToolOutput,
    },
    utils::helper::normalize_tool_name,
};

/// One executable capability. Implementations declare their parameters with
/// [`ObjectField`] builders and receive parsed JSON arguments plus the
/// request-scoped [`ToolContext`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the name of the tool. Dispatch and declarations both use the
    /// normalized form (lowercase, underscores).
    fn name(&self) -> String;

    /// What the tool does and when the model should pick it.
    fn description(&self) -> String;

    fn parameters(&self) -> ObjectField {
        ObjectField::new_parameters([StringField::new("input")
            .description("The input for the tool")
            .into()])
    }

    /// Integration types that can satisfy this tool's requirement. `None`
    /// means ungated; any single connected type from the list is enough.
    fn integration_requirement(&self) -> Option<Vec<String>> {
        None
    }

    /// Per-run invocation cap. Exceeding it fails the call, not the run.
    fn usage_limit(&self) -> Option<usize> {
        None
    }

    /// Wall-clock bound for one invocation. Falls back to the registry
    /// default when unset.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Value of `strict` in the OpenAI function declaration.
    fn strict(&self) -> bool {
        false
    }

    async fn call(&self, args: Value, context: &ToolContext) -> Result<ToolOutput, ToolError>;

    /// Plain-text form for the system prompt's capability listing.
    fn to_plain_description(&self) -> String {
        formatdoc! {"
            > {}: {}
            <INPUT_FORMAT>
            {}
            </INPUT_FORMAT>",
            normalize_tool_name(&self.name()),
            self.description(),
            self.parameters().properties_description()
        }
    }

    /// Wire-shape declaration sent with every completion request.
    fn as_openai_tool(&self) -> ChatCompletionTool {
        let function = FunctionObjectArgs::default()
            .name(normalize_tool_name(&self.name()))
            .description(self.description())
            .parameters(self.parameters().to_openai_field())
            .strict(self.strict())
            .build()
            .unwrap_or_else(|e| unreachable!("All fields must be set: {}", e));

        ChatCompletionToolArgs::default()
            .r#type(ChatCompletionToolType::Function)
            .function(function)
            .build()
            .unwrap_or_else(|e| unreachable!("All fields must be set: {}", e))
    }
}

impl<'a, T> From<T> for Box<dyn Tool + 'a>
where
    T: Tool + 'a,
{
    fn from(tool: T) -> Self {
        Box::new(tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct WeatherTool;

    #[async_trait]
    impl Tool for WeatherTool {
        fn name(&self) -> String {
            "Weather Lookup".into()
        }

        fn description(&self) -> String {
            "Fetches current weather for a city".into()
        }

        fn parameters(&self) -> ObjectField {
            ObjectField::new_parameters([StringField::new("city")
                .description("City to look up")
                .into()])
        }

        async fn call(&self, args: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::new(json!({ "city": args["city"], "temp_c": 19 })))
        }
    }

    #[test]
    fn declaration_uses_the_normalized_name() {
        let declaration = WeatherTool.as_openai_tool();
        assert_eq!(declaration.function.name, "weather_lookup");
        assert_eq!(
            declaration.function.parameters,
            Some(json!({
                "type": "object",
                "properties": {
                    "city": { "type": "string", "description": "City to look up" }
                },
                "required": ["city"],
                "additionalProperties": true
            }))
        );
    }

    #[test]
    fn plain_description_wraps_the_input_format() {
        let rendered = WeatherTool.to_plain_description();
        assert!(rendered.starts_with("> weather_lookup: Fetches current weather"));
        assert!(rendered.contains("<INPUT_FORMAT>"));
        assert!(rendered.contains("city (string): City to look up"));
    }

    #[test]
    fn default_parameters_declare_a_single_input() {
        struct BareTool;

        #[async_trait]
        impl Tool for BareTool {
            fn name(&self) -> String {
                "bare".into()
            }

            fn description(&self) -> String {
                "Does one thing".into()
            }

            async fn call(
                &self,
                _args: Value,
                _context: &ToolContext,
            ) -> Result<ToolOutput, ToolError> {
                Ok(ToolOutput::from("ok"))
            }
        }

        let declaration = BareTool.as_openai_tool();
        let parameters = declaration.function.parameters.unwrap();
        assert_eq!(parameters["required"], json!(["input"]));
    }
}
