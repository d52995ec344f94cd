//! REST API routes and handlers.

mod health;
mod models;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub use types::{CurrentModelResponse, HealthResponse, MessageResponse, SwitchModelQuery};

/// Create the API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/switch_model", post(models::switch_model))
        .route("/api/current_model", get(models::current_model))
        // Read by the web UI to populate its model selector
        .route("/config.json", get(models::get_config))
}
