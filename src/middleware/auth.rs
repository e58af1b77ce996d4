use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::token::validate_token;
use crate::config::CONFIG;
use crate::error::ApiError;

/// Bearer-token guard. Embedding this extractor in a handler signature runs
/// token validation before the handler body, rejecting the request with 401
/// before any store access. Carries the validated subject username.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let auth = auth.trim();
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let username = validate_token(token, &CONFIG.secret_key)?;
        Ok(Self(username))
    }
}
