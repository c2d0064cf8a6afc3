/// API routes and handlers
pub mod encode;
pub mod health;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(encode::routes())
        .merge(health::routes())
}
