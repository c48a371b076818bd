use crate::tools::fields::{PrimitiveField, ToolField};

#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    name: String,
    description: Option<String>,
    required: bool,
    r#enum: Option<Vec<f64>>,
}

impl NumberField {
    pub fn new_full(
        name: impl Into<String>,
        description: Option<String>,
        required: bool,
        r#enum: Option<Vec<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            required,
            r#enum,
        }
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self::new_full(name, None, true, None)
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

    pub fn r#enum(mut self, options: impl IntoIterator<Item = f64>) -> Self {
        self.r#enum = Some(options.into_iter().collect());
        self
    }
}

impl PrimitiveField for NumberField {
    type FieldType = f64;

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
        "number"
    }

    fn r#enum(&self) -> Option<&Vec<f64>> {
        self.r#enum.as_ref()
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<NumberField> for Box<dyn ToolField> {
    fn from(field: NumberField) -> Self {
        Box::new(field)
    }
}
