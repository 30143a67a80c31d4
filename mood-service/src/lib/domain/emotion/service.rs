use std::sync::Arc;

use chrono::Utc;

use crate::domain::emotion::errors::EmotionError;
use crate::domain::emotion::models::Emotion;
use crate::domain::emotion::models::NewEmotion;
use crate::domain::emotion::models::RecordEmotionCommand;
use crate::domain::emotion::ports::EmotionRepository;

/// How many entries a history request returns at most.
const USER_HISTORY_LIMIT: i64 = 50;

/// Mood logging service.
pub struct EmotionService {
    repository: Arc<dyn EmotionRepository>,
}

impl EmotionService {
    pub fn new(repository: Arc<dyn EmotionRepository>) -> Self {
        Self { repository }
    }

    /// Record a mood entry, stamping it with the current time.
    ///
    /// # Returns
    /// Store-assigned entry id
    pub async fn record(&self, command: RecordEmotionCommand) -> Result<String, EmotionError> {
        let entry = NewEmotion {
            user_id: command.user_id,
            user_name: command.user_name,
            mood: command.mood,
            note: command.note,
            created_at: Utc::now(),
        };

        let id = self.repository.insert(entry).await?;
        tracing::debug!(entry_id = %id, "mood entry recorded");
        Ok(id)
    }

    /// A user's most recent entries, newest first.
    pub async fn history_for_user(&self, user_id: &str) -> Result<Vec<Emotion>, EmotionError> {
        self.repository
            .find_by_user(user_id, USER_HISTORY_LIMIT)
            .await
    }
}
