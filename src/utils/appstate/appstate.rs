use crate::utils::config::app_config::AppConfig;
use crate::utils::rest_handlers::{
    api_docs_handler, download_handler, export_handler, rest_responses::ErrorResponse,
};
use axum::Json;
use axum::routing::*;

use std::sync::Arc;

pub type SharedState = Arc<AppState>;

/// Everything a handler needs. Built once at startup, never mutated.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(AppState { config })
    }
}

pub fn create_app(state: SharedState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/export", post(export_handler::export_handler))
        .route("/download/{filename}", get(download_handler::download_handler))
        .route("/apispec_1.json", get(api_docs_handler::apispec_handler))
        .route("/docs", get(api_docs_handler::docs_handler))
        .fallback(fallback)
        .with_state(state)
}

/// axum handler for any request that fails to match the router routes.
/// This implementation responds with HTTP status code NOT FOUND (404).
pub async fn fallback(uri: axum::http::Uri) -> impl axum::response::IntoResponse {
    tracing::debug!(%uri, "no route");
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Not found: {}", uri),
        }),
    )
}

pub async fn health_check() -> Result<String, axum::http::StatusCode> {
    Ok("Health : Ok".into())
}
