use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::emotion::errors::EmotionError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

pub mod get_user;
pub mod health;
pub mod list_user_emotions;
pub mod list_users;
pub mod login;
pub mod record_emotion;
pub mod register;
pub mod update_user;

/// Successful response: a status code plus the enveloped payload.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Request-boundary error; every variant renders as the JSON error
/// envelope, never as a bare status or a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidDisplayName(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::HashingFailure(_)
            | UserError::TokenIssuance(_)
            | UserError::StoreUnavailable(_) => {
                tracing::error!(error = %err, "internal error");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<EmotionError> for ApiError {
    fn from(err: EmotionError) -> Self {
        match err {
            EmotionError::StoreUnavailable(_) => {
                tracing::error!(error = %err, "internal error");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponseBody<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public identity projection shared by the user endpoints.
///
/// The password hash has no field here, so it cannot leak by accident.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserData {
    pub id: String,
    pub nama: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl From<&User> for PublicUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            nama: user.nama.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}
