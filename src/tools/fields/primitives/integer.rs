use crate::tools::fields::{PrimitiveField, ToolField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerField {
    name: String,
    description: Option<String>,
    required: bool,
    r#enum: Option<Vec<i64>>,
}

impl IntegerField {
    pub fn new_full(
        name: impl Into<String>,
        description: Option<String>,
        required: bool,
        r#enum: Option<Vec<i64>>,
    ) -> Self {
        let r#enum = r#enum.map(|options| {
            let mut deduped = Vec::with_capacity(options.len());
            for option in options {
                if !deduped.contains(&option) {
                    deduped.push(option);
                }
            }
            deduped
        });

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

    pub fn r#enum(self, options: impl IntoIterator<Item = i64>) -> Self {
        Self::new_full(
            self.name,
            self.description,
            self.required,
            Some(options.into_iter().collect()),
        )
    }
}

impl PrimitiveField for IntegerField {
    type FieldType = i64;

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
        "integer"
    }

    fn r#enum(&self) -> Option<&Vec<i64>> {
        self.r#enum.as_ref()
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<IntegerField> for Box<dyn ToolField> {
    fn from(field: IntegerField) -> Self {
        Box::new(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_type_and_options() {
        let field = IntegerField::new("limit")
            .description("Maximum results")
            .optional()
            .r#enum([10, 25, 50]);
        assert_eq!(
            field.to_plain_description(),
            "limit (integer, optional): Maximum results, should be one of [10, 25, 50]"
        );
        assert_eq!(
            field.to_openai_field(),
            json!({
                "type": "integer",
                "description": "Maximum results",
                "enum": [10, 25, 50]
            })
        );
    }
}
