//! Application state shared across request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use modelswitch_store::ConfigStore;

use crate::config::ServerConfig;
use crate::process::{ProcessControl, SystemProcessControl};
use crate::switcher::ModelSwitcher;

/// Application state shared across request handlers.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
    /// Model switch pipeline.
    pub switcher: ModelSwitcher,
    /// Start time.
    start_time: Instant,
}

impl AppState {
    /// Create state that controls real processes as configured.
    pub fn new(config: ServerConfig) -> Self {
        let processes = Arc::new(SystemProcessControl::from_config(&config));
        Self::with_process_control(config, processes)
    }

    /// Create state with a custom process controller.
    pub fn with_process_control(config: ServerConfig, processes: Arc<dyn ProcessControl>) -> Self {
        let store = ConfigStore::new(config.model_config_path.clone());
        Self {
            switcher: ModelSwitcher::new(store, processes),
            config,
            start_time: Instant::now(),
        }
    }

    /// Get uptime duration.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
