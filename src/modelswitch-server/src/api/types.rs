//! API request and response types.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Query parameters for a model switch.
#[derive(Debug, Default)]
pub struct SwitchModelQuery {
    /// Model to switch to.
    pub model: Option<String>,
}

impl SwitchModelQuery {
    /// Build from decoded query pairs. The first `model` pair wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let model = pairs
            .into_iter()
            .find(|(key, _)| key == "model")
            .map(|(_, value)| value);
        Self { model }
    }
}

/// Reply to a model switch, for success and rejection alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Active model response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentModelResponse {
    pub current_model: String,
}
