/// Health check and metrics endpoints
use crate::{context::AppContext, error::EncoderResult, metrics};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

/// Build health check routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health_basic))
        .route("/metrics", get(metrics_text))
}

/// Basic health check
///
/// Returns simple JSON with status and version
pub async fn health_basic(State(ctx): State<AppContext>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": ctx.config.service.version
    }))
}

/// Prometheus scrape endpoint
pub async fn metrics_text() -> EncoderResult<impl IntoResponse> {
    let body = metrics::render_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
