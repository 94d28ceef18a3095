//! API response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain message body returned by the account endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(
        status: HealthStatus,
        service: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            status,
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(HealthStatus::Healthy, service, version)
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_string(&MessageResponse::new("User is verified")).unwrap();
        assert_eq!(json, r#"{"message":"User is verified"}"#);
    }

    #[test]
    fn test_health_status_serialization() {
        let health = HealthResponse::healthy("account-verify-api", "0.1.0");
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "account-verify-api");
    }

    #[test]
    fn test_unhealthy_status() {
        let health = HealthResponse::new(HealthStatus::Unhealthy, "account-verify-api", "0.1.0");
        assert!(!health.is_healthy());
        assert_eq!(serde_json::to_value(&health).unwrap()["status"], "unhealthy");
    }
}
