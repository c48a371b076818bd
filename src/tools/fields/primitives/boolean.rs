use crate::tools::fields::{PrimitiveField, ToolField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanField {
    name: String,
    description: Option<String>,
    required: bool,
}

impl BooleanField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: true,
        }
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

impl PrimitiveField for BooleanField {
    type FieldType = bool;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn required(&self) -> bool {
        self.required
    }

    fn type_name(&self) -> &str {
        "boolean"
    }

    fn r#enum(&self) -> Option<&Vec<bool>> {
        None
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<BooleanField> for Box<dyn ToolField> {
    fn from(field: BooleanField) -> Self {
        Box::new(field)
    }
}
