use serde_json::{Map, Value};

use crate::{tools::fields::ToolField, utils::helper::add_indent};

/// A nested object parameter. The top-level parameter declaration of every
/// tool is one of these.
#[derive(Clone)]
pub struct ObjectField {
    name: String,
    description: Option<String>,
    required: bool,
    properties: Vec<Box<dyn ToolField>>,
    additional_properties: bool,
}

impl ObjectField {
    pub fn new_full(
        name: impl Into<String>,
        description: Option<String>,
        required: bool,
        properties: Vec<Box<dyn ToolField>>,
        additional_properties: bool,
    ) -> Self {
        let mut properties = properties;
        // Required properties first, original order otherwise.
        properties.sort_by_key(|property| !property.required());

        Self {
            name: name.into(),
            description,
            required,
            properties,
            additional_properties,
        }
    }

    pub fn new(name: impl Into<String>, properties: Vec<Box<dyn ToolField>>) -> Self {
        Self::new_full(name, None, true, properties, true)
    }

    /// Root declaration for a tool's parameters.
    pub fn new_parameters(properties: impl IntoIterator<Item = Box<dyn ToolField>>) -> Self {
        Self::new("parameters", properties.into_iter().collect())
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

    pub fn additional_properties(mut self, additional_properties: bool) -> Self {
        self.additional_properties = additional_properties;
        self
    }

    pub fn properties(&self) -> &[Box<dyn ToolField>] {
        &self.properties
    }

    pub fn properties_description(&self) -> String {
        if self.properties.is_empty() {
            return "{}".into();
        }

        let inner = self
            .properties
            .iter()
            .map(|property| property.to_plain_description())
            .collect::<Vec<_>>()
            .join(",\n");

        format!("{{\n{}\n}}", add_indent(&inner, 4, true))
    }
}

impl ToolField for ObjectField {
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

        field.insert("type".into(), "object".into());
        if let Some(description) = &self.description {
            field.insert("description".into(), description.as_str().into());
        }
        field.insert(
            "properties".into(),
            Value::Object(
                self.properties
                    .iter()
                    .map(|property| (property.name().into(), property.to_openai_field()))
                    .collect(),
            ),
        );
        field.insert(
            "required".into(),
            Value::Array(
                self.properties
                    .iter()
                    .filter(|property| property.required())
                    .map(|property| property.name().into())
                    .collect(),
            ),
        );
        field.insert(
            "additionalProperties".into(),
            self.additional_properties.into(),
        );

        Value::Object(field)
    }

    fn to_plain_description(&self) -> String {
        let type_info = if self.required {
            "object".to_string()
        } else {
            "object, optional".to_string()
        };

        format!(
            "{} ({}): {}",
            self.name,
            type_info,
            self.properties_description()
        )
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<ObjectField> for Box<dyn ToolField> {
    fn from(field: ObjectField) -> Self {
        Box::new(field)
    }
}
