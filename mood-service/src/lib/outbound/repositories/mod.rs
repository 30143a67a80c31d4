pub mod emotion;
pub mod user;

pub use emotion::MongoEmotionRepository;
pub use user::MongoUserRepository;

use std::future::IntoFuture;
use std::time::Duration;

/// Upper bound on any single store call.
const OP_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure talking to the document store.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("store operation timed out")]
    Timeout,

    #[error("{0}")]
    Driver(String),
}

/// Run one store operation under the per-call timeout.
///
/// An elapsed timeout cancels the operation by dropping its future.
pub(crate) async fn bounded<T, F>(operation: F) -> Result<T, StoreError>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    match tokio::time::timeout(OP_TIMEOUT, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(StoreError::Driver(e.to_string())),
        Err(_) => Err(StoreError::Timeout),
    }
}
