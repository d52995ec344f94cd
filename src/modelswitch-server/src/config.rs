//! Server configuration.

use std::path::PathBuf;

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use modelswitch_store::DEFAULT_CONFIG_PATH;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:5000").
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Path of the model configuration file that lists available models.
    #[serde(default = "default_model_config_path")]
    pub model_config_path: PathBuf,

    /// Command used to stop the running model. The model name is appended.
    #[serde(default = "default_terminate_command")]
    pub terminate_command: Vec<String>,

    /// Command used to start a model. The model name is appended.
    #[serde(default = "default_launch_command")]
    pub launch_command: Vec<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_model_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn default_terminate_command() -> Vec<String> {
    vec!["pkill".to_string(), "-f".to_string()]
}

fn default_launch_command() -> Vec<String> {
    vec!["ollama".to_string(), "run".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            model_config_path: default_model_config_path(),
            terminate_command: default_terminate_command(),
            launch_command: default_launch_command(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `MODELSWITCH_*` overrides using `lookup` to resolve variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("MODELSWITCH_LISTEN_ADDR") {
            self.listen_addr = addr;
        }

        if let Some(path) = lookup("MODELSWITCH_CONFIG_PATH") {
            self.model_config_path = PathBuf::from(path);
        }

        // Commands are whitespace separated, no shell quoting.
        if let Some(command) = lookup("MODELSWITCH_TERMINATE_COMMAND") {
            self.terminate_command = split_command(&command);
        }

        if let Some(command) = lookup("MODELSWITCH_LAUNCH_COMMAND") {
            self.launch_command = split_command(&command);
        }
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.terminate_command.is_empty(),
            "terminate_command must name a program"
        );
        ensure!(
            !self.launch_command.is_empty(),
            "launch_command must name a program"
        );
        Ok(())
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json or pretty).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.model_config_path, PathBuf::from("/app/config.json"));
        assert_eq!(config.terminate_command, vec!["pkill", "-f"]);
        assert_eq!(config.launch_command, vec!["ollama", "run"]);
        assert!(!config.logging.is_json());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"launch_command": ["llama-server", "-m"]}"#).unwrap();
        assert_eq!(config.launch_command, vec!["llama-server", "-m"]);
        assert_eq!(config.terminate_command, vec!["pkill", "-f"]);
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MODELSWITCH_LISTEN_ADDR", "127.0.0.1:8080"),
            ("MODELSWITCH_CONFIG_PATH", "/tmp/models.json"),
            ("MODELSWITCH_LAUNCH_COMMAND", "  vllm   serve "),
        ]);

        let mut config = ServerConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.model_config_path, PathBuf::from("/tmp/models.json"));
        assert_eq!(config.launch_command, vec!["vllm", "serve"]);
        assert_eq!(config.terminate_command, vec!["pkill", "-f"]);
    }

    #[test]
    fn test_empty_command_rejected() {
        let mut config = ServerConfig::default();
        config.apply_env(|key| (key == "MODELSWITCH_TERMINATE_COMMAND").then(String::new));
        assert!(config.terminate_command.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = ServerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.listen_addr, parsed.listen_addr);
        assert_eq!(config.launch_command, parsed.launch_command);
    }
}
