use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// Liveness probe.
pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "ok".to_string(),
        },
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
}
