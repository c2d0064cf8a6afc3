/// HTTP server setup and routing
use crate::{
    context::AppContext,
    error::{EncoderError, EncoderResult},
    metrics::track_metrics,
};
use axum::{
    http::{header, Method},
    middleware, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Build the main application router
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION]);

    Router::new()
        .merge(crate::api::routes())
        .with_state(ctx)
        // route_layer so MatchedPath is available to the metrics labels
        .route_layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .fallback(not_found)
}

/// 404 handler
async fn not_found() -> EncoderError {
    EncoderError::NotFound("Endpoint not found".to_string())
}

/// Start the HTTP server
pub async fn serve(ctx: AppContext) -> EncoderResult<()> {
    let addr = ctx.config.bind_address();

    info!("site-encoder v{} listening on {}", ctx.config.service.version, addr);
    info!("   Sites API: {}", ctx.config.upstream.sites_api_url);

    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EncoderError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EncoderError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
