//! Model configuration store for modelswitch.
//!
//! The configuration lives in a single JSON file that lists the models the
//! server may launch and records which one is currently active. The file is
//! created by the operator; this crate only reads it and rewrites it.

mod model;
mod store;

pub use model::ModelConfig;
pub use store::ConfigStore;

use std::path::PathBuf;

/// Location of the configuration file when none is configured.
pub const DEFAULT_CONFIG_PATH: &str = "/app/config.json";

/// Error types for configuration store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Whether the file content was the problem rather than the file itself.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
