use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PublicUserData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // No shape validation on the email here: an address that could never
    // have been registered fails the lookup and comes back as the same
    // generic InvalidCredentials as a wrong password.
    let authenticated = state
        .user_service
        .login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: authenticated.token,
            user: PublicUserData::from(&authenticated.user),
        },
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: PublicUserData,
}
