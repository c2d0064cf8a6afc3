/// URL encoding endpoint
///
/// `GET /encode?url=<url>` with an optional `Authorization: Bearer <token>`.
use crate::{
    auth::BearerCredential,
    context::AppContext,
    error::{EncoderError, EncoderResult},
    resolver::{normalize_url, EncodeResponse},
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

const INVALID_URL: &str = "Missing or invalid url parameter";

#[derive(Debug, Deserialize)]
pub struct EncodeParams {
    pub url: Option<String>,
}

/// Build encode routes
pub fn routes() -> Router<AppContext> {
    Router::new().route("/encode", get(encode).fallback(method_not_allowed))
}

/// Resolve `url` to a verified property and return it percent-encoded.
///
/// Once the query validates this always answers 200; upstream trouble
/// only adds a warning.
pub async fn encode(
    State(ctx): State<AppContext>,
    credential: BearerCredential,
    params: Result<Query<EncodeParams>, QueryRejection>,
) -> EncoderResult<Json<EncodeResponse>> {
    let raw = match params {
        Ok(Query(EncodeParams { url: Some(url) })) => url,
        Ok(_) => return Err(EncoderError::Validation(INVALID_URL.to_string())),
        Err(rejection) => {
            debug!("Rejected encode query: {}", rejection);
            return Err(EncoderError::Validation(INVALID_URL.to_string()));
        }
    };

    let normalized =
        normalize_url(&raw).ok_or_else(|| EncoderError::Validation(INVALID_URL.to_string()))?;

    let resolution = ctx.resolver.resolve(&normalized, credential.token()).await;

    Ok(Json(resolution.into()))
}

async fn method_not_allowed() -> EncoderError {
    EncoderError::MethodNotAllowed
}
