use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A connected external account. Only `integration_type` is ever inspected
/// here; credentials and other configuration stay opaque and travel
/// untouched to tool handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub integration_type: String,
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl Integration {
    pub fn new(integration_type: impl Into<String>) -> Self {
        Self {
            integration_type: integration_type.into(),
            config: Map::new(),
        }
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_keys_stay_flattened() {
        let integration: Integration = serde_json::from_value(json!({
            "integration_type": "google",
            "access_token": "ya29.secret",
            "scopes": ["gmail.send"]
        }))
        .unwrap();
        assert_eq!(integration.integration_type, "google");
        assert_eq!(integration.config["access_token"], json!("ya29.secret"));

        let round_trip = serde_json::to_value(&integration).unwrap();
        assert_eq!(round_trip["scopes"], json!(["gmail.send"]));
    }
}
