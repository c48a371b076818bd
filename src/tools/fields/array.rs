use serde_json::{Map, Value};

use crate::tools::fields::{StringField, ToolField};

#[derive(Clone)]
pub struct ArrayField {
    name: String,
    description: Option<String>,
    required: bool,
    items: Box<dyn ToolField>,
}

impl ArrayField {
    pub fn new(name: impl Into<String>, items: impl Into<Box<dyn ToolField>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: true,
            items: items.into(),
        }
    }

    pub fn new_string_array(name: impl Into<String>) -> Self {
        Self::new(name, StringField::new("items"))
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

impl ToolField for ArrayField {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn required(&self) -> bool {
        self.required
    }

    fn to_openai_field(&self) -> Value {
        let mut field = Map::<String, Value>::new();

        field.insert("type".into(), "array".into());
        if let Some(description) = &self.description {
            field.insert("description".into(), description.as_str().into());
        }
        field.insert("items".into(), self.items.to_openai_field());

        Value::Object(field)
    }

    fn to_plain_description(&self) -> String {
        let type_info = if self.required {
            "array".to_string()
        } else {
            "array, optional".to_string()
        };

        match &self.description {
            Some(description) => format!(
                "{} ({} of {}): {}",
                self.name,
                type_info,
                self.items.to_plain_description(),
                description
            ),
            None => format!(
                "{} ({} of {})",
                self.name,
                type_info,
                self.items.to_plain_description()
            ),
        }
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<ArrayField> for Box<dyn ToolField> {
    fn from(field: ArrayField) -> Self {
        Box::new(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_item_schema() {
        let field = ArrayField::new_string_array("recipients").description("Email addresses");
        assert_eq!(
            field.to_openai_field(),
            json!({
                "type": "array",
                "description": "Email addresses",
                "items": { "type": "string" }
            })
        );
        assert_eq!(
            field.to_plain_description(),
            "recipients (array of items (string)): Email addresses"
        );
    }
}
