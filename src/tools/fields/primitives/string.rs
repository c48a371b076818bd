use crate::tools::fields::{PrimitiveField, ToolField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringField {
    name: String,
    description: Option<String>,
    required: bool,
    r#enum: Option<Vec<String>>,
}

impl StringField {
    pub fn new_full(
        name: impl Into<String>,
        description: Option<String>,
        required: bool,
        r#enum: Option<Vec<String>>,
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

    pub fn r#enum<I, S>(self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new_full(
            self.name,
            self.description,
            self.required,
            Some(options.into_iter().map(Into::into).collect()),
        )
    }
}

impl PrimitiveField for StringField {
    type FieldType = String;

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
        "string"
    }

    fn r#enum(&self) -> Option<&Vec<String>> {
        self.r#enum.as_ref()
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        Box::new(self.clone())
    }
}

impl From<StringField> for Box<dyn ToolField> {
    fn from(field: StringField) -> Self {
        Box::new(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_description_with_description() {
        let field = StringField::new("city").description("City to look up");
        assert_eq!(field.to_plain_description(), "city (string): City to look up");
    }

    #[test]
    fn plain_description_marks_optional_fields() {
        let field = StringField::new("city")
            .description("City to look up")
            .optional();
        assert_eq!(
            field.to_plain_description(),
            "city (string, optional): City to look up"
        );
    }

    #[test]
    fn plain_description_lists_enum_options() {
        let field = StringField::new("units")
            .description("Unit system")
            .r#enum(["metric", "imperial"]);
        assert_eq!(
            field.to_plain_description(),
            "units (string): Unit system, should be one of [metric, imperial]"
        );

        let bare = StringField::new("units").r#enum(["metric", "imperial"]);
        assert_eq!(
            bare.to_plain_description(),
            "units (string): should be one of [metric, imperial]"
        );
    }

    #[test]
    fn plain_description_without_extras() {
        let field = StringField::new("city");
        assert_eq!(field.to_plain_description(), "city (string)");
    }

    #[test]
    fn enum_options_are_deduplicated() {
        let field = StringField::new("units").r#enum(["metric", "metric", "imperial"]);
        assert_eq!(
            field.to_openai_field(),
            json!({
                "type": "string",
                "enum": ["metric", "imperial"]
            })
        );
    }

    #[test]
    fn openai_field_carries_description() {
        let field = StringField::new("city").description("City to look up");
        assert_eq!(
            field.to_openai_field(),
            json!({
                "type": "string",
                "description": "City to look up"
            })
        );
    }
}
