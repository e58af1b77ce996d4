use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::models::{LogEvent, LogEventInput};
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::router::AppState;

/// POST /logeventos/ -> persists a new event and returns the full record.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<LogEventInput>,
) -> Result<Json<LogEvent>, ApiError> {
    let event = state.events.create(&input).await?;
    Ok(Json(event))
}

/// GET /logeventos/ -> all events in insertion order.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<LogEvent>>, ApiError> {
    let events = state.events.list().await?;
    Ok(Json(events))
}

/// GET /logeventos/{id}
pub async fn get_one(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<LogEvent>, ApiError> {
    let event = state.events.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// PUT /logeventos/{id} -> full replace of the mutable fields.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(input): Json<LogEventInput>,
) -> Result<Json<LogEvent>, ApiError> {
    let event = state
        .events
        .update(id, &input)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// PATCH /logeventos/{id} -> overwrite only the supplied fields.
pub async fn patch(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(input): Json<LogEventInput>,
) -> Result<Json<LogEvent>, ApiError> {
    let event = state
        .events
        .patch(id, &input)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// DELETE /logeventos/{id} -> 204 on success.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.events.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
