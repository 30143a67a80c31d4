use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PublicUserData;
use crate::inbound::http::router::AppState;

/// Serves both the public `/users` listing and the gated `/api/users` one;
/// the response shape is identical.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PublicUserData>>, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)?;

    let data = users.iter().map(PublicUserData::from).collect();

    Ok(ApiSuccess::new(StatusCode::OK, data))
}
