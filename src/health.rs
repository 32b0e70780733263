//! Health check module
//! The gateway holds no stateful collaborators, so health is a liveness answer

use axum::Json;
use serde::Serialize;

/// Health status response
#[derive(Debug, Serialize, Clone)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthStatus {
    pub fn current() -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::current())
}
