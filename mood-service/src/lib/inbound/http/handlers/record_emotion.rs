use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::emotion::models::RecordEmotionCommand;
use crate::inbound::http::router::AppState;

pub async fn record_emotion(
    State(state): State<AppState>,
    Json(body): Json<RecordEmotionRequest>,
) -> Result<ApiSuccess<RecordedEmotionData>, ApiError> {
    if body.user_id.is_empty() {
        return Err(ApiError::BadRequest("user_id is required".to_string()));
    }
    if body.mood.is_empty() {
        return Err(ApiError::BadRequest("mood is required".to_string()));
    }

    let id = state
        .emotion_service
        .record(RecordEmotionCommand {
            user_id: body.user_id,
            user_name: body.user_name,
            mood: body.mood,
            note: body.note,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RecordedEmotionData { id },
    ))
}

/// HTTP request body for recording a mood entry (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEmotionRequest {
    user_id: String,
    #[serde(default)]
    user_name: String,
    mood: String,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordedEmotionData {
    pub id: String,
}
