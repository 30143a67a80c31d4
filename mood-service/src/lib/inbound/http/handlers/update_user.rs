use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::DisplayNameError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordChange;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UpdateUserResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .update_user(&UserId::new(user_id), command)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateUserResponseData {
            message: "User updated successfully".to_string(),
        },
    ))
}

/// HTTP request body for profile updates (raw JSON).
///
/// The legacy frontend sends untouched fields as empty strings, so empty
/// and absent are treated the same.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nama: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateUserRequestError {
    #[error("Invalid display name: {0}")]
    Nama(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("No fields to update")]
    NoFields,

    #[error("Current password is required to set a new password")]
    MissingCurrentPassword,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ParseUpdateUserRequestError> {
        let nama = non_empty(self.nama).map(DisplayName::new).transpose()?;
        let email = non_empty(self.email).map(EmailAddress::new).transpose()?;

        let password_change = match (
            non_empty(self.current_password),
            non_empty(self.new_password),
        ) {
            (Some(current), Some(new)) => Some(PasswordChange { current, new }),
            (None, Some(_)) => return Err(ParseUpdateUserRequestError::MissingCurrentPassword),
            // A current password with nothing to change it to is a no-op.
            _ => None,
        };

        let command = UpdateUserCommand {
            nama,
            email,
            role: non_empty(self.role),
            bio: non_empty(self.bio),
            profile_image: non_empty(self.profile_image),
            password_change,
        };

        if command.is_empty() {
            return Err(ParseUpdateUserRequestError::NoFields);
        }

        Ok(command)
    }
}

impl From<ParseUpdateUserRequestError> for ApiError {
    fn from(err: ParseUpdateUserRequestError) -> Self {
        match err {
            ParseUpdateUserRequestError::Nama(_) | ParseUpdateUserRequestError::Email(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ParseUpdateUserRequestError::NoFields
            | ParseUpdateUserRequestError::MissingCurrentPassword => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserResponseData {
    pub message: String,
}
