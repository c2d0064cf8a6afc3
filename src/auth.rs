/// Bearer credential extraction
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::convert::Infallible;

/// Optional bearer credential forwarded to the property-listing API.
///
/// Never rejects: a missing header, a non-Bearer scheme, or a blank token
/// all yield `None`, and the handler answers without verifying ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerCredential(pub Option<String>);

impl BearerCredential {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerCredential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(authorization)| authorization.token().trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(BearerCredential(token))
    }
}
