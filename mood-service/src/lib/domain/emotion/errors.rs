use thiserror::Error;

/// Error for mood-entry operations
#[derive(Debug, Clone, Error)]
pub enum EmotionError {
    #[error("Emotion store unavailable: {0}")]
    StoreUnavailable(String),
}
