//! The model switch pipeline.
//!
//! A switch reads the model configuration, checks the requested model
//! against the allow-list, stops the current model, starts the requested one
//! and records it as current. Process failures are logged and skipped;
//! config store failures abort the switch.

use std::sync::Arc;

use tracing::{debug, info, warn};

use modelswitch_store::{ConfigStore, ModelConfig};

use crate::error::AppResult;
use crate::process::ProcessControl;

/// Reply for a model that is missing from `available_models`.
pub const MODEL_NOT_FOUND: &str = "Error: Model not found";

/// Switches the running model.
#[derive(Debug, Clone)]
pub struct ModelSwitcher {
    store: ConfigStore,
    processes: Arc<dyn ProcessControl>,
}

impl ModelSwitcher {
    pub fn new(store: ConfigStore, processes: Arc<dyn ProcessControl>) -> Self {
        Self { store, processes }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Switch to `requested` and describe the outcome.
    ///
    /// An unknown or absent model yields [`MODEL_NOT_FOUND`] as a normal
    /// value and leaves processes and the config file alone. Switching to the
    /// model that is already current restarts it.
    pub async fn switch_model(&self, requested: Option<&str>) -> AppResult<String> {
        let mut config = self.store.read()?;

        let Some(requested) = requested.filter(|model| config.is_available(model)) else {
            info!(requested = ?requested, "Switch rejected: model not available");
            return Ok(MODEL_NOT_FOUND.to_string());
        };

        info!(
            from = %config.current_model,
            to = requested,
            "Switching model"
        );

        match config.current() {
            Some(current) => {
                if let Err(e) = self.processes.terminate(current).await {
                    warn!("Failed to stop model {}: {}", current, e);
                }
            }
            None => debug!("No current model recorded, nothing to stop"),
        }

        if let Err(e) = self.processes.launch(requested).await {
            warn!("Failed to launch model {}: {}", requested, e);
        }

        config.current_model = requested.to_string();
        self.store.write(&config)?;

        Ok(format!("Switched to {requested}"))
    }

    /// Read the full model configuration.
    pub fn config(&self) -> AppResult<ModelConfig> {
        Ok(self.store.read()?)
    }

    /// Read the name of the active model.
    pub fn current_model(&self) -> AppResult<String> {
        Ok(self.store.current_model()?)
    }
}
