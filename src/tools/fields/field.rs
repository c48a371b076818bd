use serde_json::Value;

/// One declared parameter, renderable both as an OpenAI schema fragment and
/// as plain text for prompt listings.
pub trait ToolField: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn required(&self) -> bool;

    fn to_openai_field(&self) -> Value;

    fn to_plain_description(&self) -> String;

    fn clone_box(&self) -> Box<dyn ToolField>;
}

impl Clone for Box<dyn ToolField> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
