//! Model switching and model configuration endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use modelswitch_store::ModelConfig;

use crate::error::AppResult;
use crate::state::AppState;

use super::types::{CurrentModelResponse, MessageResponse, SwitchModelQuery};

/// Switch the running model.
///
/// Answers 200 with a message whether or not the model was known; only a
/// config store fault produces an error response. The query is taken as raw
/// pairs so a repeated `model` parameter resolves to its first value instead
/// of being rejected.
pub async fn switch_model(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<MessageResponse>> {
    let query = SwitchModelQuery::from_pairs(pairs);
    let message = state.switcher.switch_model(query.model.as_deref()).await?;
    Ok(Json(MessageResponse { message }))
}

/// Return the model configuration file as stored.
pub async fn get_config(State(state): State<Arc<AppState>>) -> AppResult<Json<ModelConfig>> {
    Ok(Json(state.switcher.config()?))
}

/// Return the active model name.
pub async fn current_model(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<CurrentModelResponse>> {
    Ok(Json(CurrentModelResponse {
        current_model: state.switcher.current_model()?,
    }))
}
