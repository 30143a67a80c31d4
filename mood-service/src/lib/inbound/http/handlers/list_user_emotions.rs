use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::emotion::models::Emotion;
use crate::inbound::http::router::AppState;

pub async fn list_user_emotions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<EmotionData>>, ApiError> {
    let entries = state
        .emotion_service
        .history_for_user(&user_id)
        .await
        .map_err(ApiError::from)?;

    let data = entries.iter().map(EmotionData::from).collect();

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, Serialize)]
pub struct EmotionData {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub mood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Emotion> for EmotionData {
    fn from(entry: &Emotion) -> Self {
        Self {
            id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            user_name: entry.user_name.clone(),
            mood: entry.mood.clone(),
            note: entry.note.clone(),
            created_at: entry.created_at,
        }
    }
}
