//! Health check and metrics endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};

use crate::metrics;
use crate::types::HealthResponse;
use crate::AppState;

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.info.model_id.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        board_size: state.config.model.board_size,
        cuda: state.info.accelerated,
        evaluator: state.info.kind.to_string(),
        degraded: state.info.degraded,
    })
}

/// Prometheus metrics handler.
pub async fn metrics_handler() -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::encode_metrics(),
    )
}
