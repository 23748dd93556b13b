//! Health check response models

use serde::{Deserialize, Serialize};

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_UNHEALTHY: &str = "unhealthy";

/// Liveness report including database reachability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: String,
    pub version: String,
}

impl HealthResponse {
    pub fn new(database_ok: bool) -> Self {
        let (status, database) = if database_ok {
            (STATUS_HEALTHY, "connected")
        } else {
            (STATUS_UNHEALTHY, "disconnected")
        };
        Self {
            status: status.to_string(),
            database: database.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: crate::version::VERSION.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == STATUS_HEALTHY
    }
}
