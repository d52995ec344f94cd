//! Modelswitch server - HTTP API that swaps the running inference model.
//!
//! This crate provides:
//! - `POST /api/switch_model?model=<name>` to stop the current model process
//!   and start the requested one
//! - `GET /config.json` and `GET /api/current_model` to inspect the model
//!   configuration file
//! - `GET /api/health` for liveness checks

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod api;
pub mod config;
pub mod error;
pub mod process;
pub mod state;
pub mod switcher;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use process::{ProcessControl, SystemProcessControl};
pub use state::AppState;
pub use switcher::{MODEL_NOT_FOUND, ModelSwitcher};

/// Run the server with graceful shutdown support.
pub async fn run_with_shutdown<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    config.validate()?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!(
        "Model config: {}, launch command: {:?}, terminate command: {:?}",
        config.model_config_path.display(),
        config.launch_command,
        config.terminate_command
    );

    let app = create_router(AppState::new(config));

    info!("Starting modelswitch server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    api::routes()
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(Arc::new(state))
}
