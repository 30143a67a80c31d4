use async_trait::async_trait;

use crate::domain::emotion::errors::EmotionError;
use crate::domain::emotion::models::Emotion;
use crate::domain::emotion::models::NewEmotion;

/// Persistence port for mood entries.
#[async_trait]
pub trait EmotionRepository: Send + Sync + 'static {
    /// Persist an entry and return the store-assigned id.
    ///
    /// # Errors
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn insert(&self, entry: NewEmotion) -> Result<String, EmotionError>;

    /// A user's entries, newest first, at most `limit` of them.
    ///
    /// # Errors
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Emotion>, EmotionError>;
}
