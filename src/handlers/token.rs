use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::debug;

use crate::auth::TokenResponse;
use crate::error::ApiError;
use crate::router::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /token -> exchanges a username/password form for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let response = state
        .auth
        .issue_token(&form.username, &form.password)
        .await
        .inspect_err(|_| debug!(username = %form.username, "login rejected"))?;
    Ok(Json(response))
}
