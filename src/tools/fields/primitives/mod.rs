mod boolean;
pub use boolean::*;

mod integer;
pub use integer::*;

mod number;
pub use number::*;

mod string;
pub use string::*;

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::tools::fields::ToolField;

/// Shared shape of leaf fields. Implementors supply the JSON type name and
/// optional enum options; the [`ToolField`] rendering comes for free.
pub trait PrimitiveField: Send + Sync {
    type FieldType: Display + Serialize;

    fn name(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn required(&self) -> bool;

    fn type_name(&self) -> &str;

    fn r#enum(&self) -> Option<&Vec<Self::FieldType>>;

    fn clone_box(&self) -> Box<dyn ToolField>;
}

impl<T> ToolField for T
where
    T: PrimitiveField,
{
    fn name(&self) -> &str {
        PrimitiveField::name(self)
    }

    fn description(&self) -> Option<&str> {
        PrimitiveField::description(self)
    }

    fn required(&self) -> bool {
        PrimitiveField::required(self)
    }

    fn to_openai_field(&self) -> Value {
        let mut field = Map::<String, Value>::new();

        field.insert("type".into(), self.type_name().into());
        if let Some(description) = PrimitiveField::description(self) {
            field.insert("description".into(), description.into());
        }
        if let Some(options) = self.r#enum() {
            field.insert(
                "enum".into(),
                serde_json::to_value(options).unwrap_or_default(),
            );
        }

        Value::Object(field)
    }

    fn to_plain_description(&self) -> String {
        let type_info = if PrimitiveField::required(self) {
            self.type_name().to_string()
        } else {
            format!("{}, optional", self.type_name())
        };

        let options = self.r#enum().map(|options| {
            options
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        });

        match (PrimitiveField::description(self), options) {
            (Some(description), Some(options)) => format!(
                "{} ({}): {}, should be one of [{}]",
                PrimitiveField::name(self),
                type_info,
                description,
                options
            ),
            (Some(description), None) => format!(
                "{} ({}): {}",
                PrimitiveField::name(self),
                type_info,
                description
            ),
            (None, Some(options)) => format!(
                "{} ({}): should be one of [{}]",
                PrimitiveField::name(self),
                type_info,
                options
            ),
            (None, None) => format!("{} ({})", PrimitiveField::name(self), type_info),
        }
    }

    fn clone_box(&self) -> Box<dyn ToolField> {
        PrimitiveField::clone_box(self)
    }
}
