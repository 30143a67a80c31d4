use chrono::DateTime;
use chrono::Utc;

/// Recorded mood entry.
#[derive(Debug, Clone)]
pub struct Emotion {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub mood: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entry awaiting insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewEmotion {
    pub user_id: String,
    pub user_name: String,
    pub mood: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Command to record a mood entry.
///
/// The timestamp is assigned server-side when the entry is recorded.
#[derive(Debug, Clone)]
pub struct RecordEmotionCommand {
    pub user_id: String,
    pub user_name: String,
    pub mood: String,
    pub note: Option<String>,
}
