use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::get_metrics;
use crate::startup::AppState;
use service_core::error::AppError;

/// Liveness probe; does not touch the store.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "notes-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe; ready only while the store answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.ping().await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        AppError::ServiceUnavailable
    })?;
    Ok(StatusCode::OK)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
