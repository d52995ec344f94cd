use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of the model configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Models that may be switched to.
    pub available_models: Vec<String>,

    /// Model recorded as running. Empty until the first switch.
    #[serde(default)]
    pub current_model: String,

    /// Keys this server does not interpret; written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelConfig {
    pub fn new(available_models: Vec<String>, current_model: impl Into<String>) -> Self {
        Self {
            available_models,
            current_model: current_model.into(),
            extra: Map::new(),
        }
    }

    /// Check whether `model` is on the allow-list.
    pub fn is_available(&self, model: &str) -> bool {
        self.available_models.iter().any(|m| m == model)
    }

    /// The current model, or `None` when nothing has been recorded yet.
    pub fn current(&self) -> Option<&str> {
        if self.current_model.is_empty() {
            None
        } else {
            Some(&self.current_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_current_model_defaults_to_empty() {
        let config: ModelConfig =
            serde_json::from_str(r#"{"available_models": ["llama3", "mistral"]}"#).unwrap();
        assert_eq!(config.current_model, "");
        assert_eq!(config.current(), None);
        assert!(config.is_available("mistral"));
        assert!(!config.is_available("phi3"));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let raw = r#"{"available_models":["a"],"current_model":"a","port":11434}"#;
        let config: ModelConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.extra.get("port"), Some(&Value::from(11434)));

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["port"], 11434);
        assert_eq!(value["current_model"], "a");
    }

    #[test]
    fn test_available_models_is_required() {
        let result = serde_json::from_str::<ModelConfig>(r#"{"current_model": "a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_is_exact() {
        let config = ModelConfig::new(vec!["llama3".to_string()], "llama3");
        assert!(!config.is_available("llama"));
        assert!(!config.is_available("LLAMA3"));
        assert_eq!(config.current(), Some("llama3"));
    }
}
