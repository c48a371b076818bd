use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::helper::normalize_tool_name;

/// Which registered tools an agent may use: everything, or an explicit set.
/// Serializes as the string `"all"` or as an array of tool names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSelection {
    All,
    Only(Vec<String>),
}

impl Default for ToolSelection {
    fn default() -> Self {
        Self::All
    }
}

impl ToolSelection {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToolSelection::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, name: &str) -> bool {
        match self {
            ToolSelection::All => true,
            ToolSelection::Only(names) => {
                let name = normalize_tool_name(name);
                names
                    .iter()
                    .any(|candidate| normalize_tool_name(candidate) == name)
            }
        }
    }
}

impl Serialize for ToolSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ToolSelection::All => serializer.serialize_str("all"),
            ToolSelection::Only(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ToolSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(sentinel) if sentinel == "all" => Ok(ToolSelection::All),
            Value::Array(entries) => {
                let mut names = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        // A list containing the sentinel means everything.
                        Value::String(name) if name == "all" => return Ok(ToolSelection::All),
                        Value::String(name) => names.push(name),
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "expected a tool name, got {}",
                                other
                            )))
                        }
                    }
                }
                Ok(ToolSelection::Only(names))
            }
            other => Err(serde::de::Error::custom(format!(
                "expected \"all\" or an array of tool names, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_the_sentinel_and_the_list() {
        assert_eq!(serde_json::to_value(ToolSelection::All).unwrap(), json!("all"));
        assert_eq!(
            serde_json::to_value(ToolSelection::only(["get_weather"])).unwrap(),
            json!(["get_weather"])
        );
    }

    #[test]
    fn deserializes_both_shapes() {
        let all: ToolSelection = serde_json::from_value(json!("all")).unwrap();
        assert_eq!(all, ToolSelection::All);

        let subset: ToolSelection =
            serde_json::from_value(json!(["get_weather", "search_web"])).unwrap();
        assert_eq!(subset, ToolSelection::only(["get_weather", "search_web"]));

        let sentinel_in_list: ToolSelection = serde_json::from_value(json!(["all"])).unwrap();
        assert_eq!(sentinel_in_list, ToolSelection::All);

        let invalid: Result<ToolSelection, _> = serde_json::from_value(json!(42));
        assert!(invalid.is_err());
    }

    #[test]
    fn allows_compares_normalized_names() {
        let selection = ToolSelection::only(["Web Search"]);
        assert!(selection.allows("web_search"));
        assert!(selection.allows("Web Search"));
        assert!(!selection.allows("send_email"));
        assert!(ToolSelection::All.allows("anything"));
    }
}
