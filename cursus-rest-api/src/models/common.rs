//! Common request/response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bulk delete/deactivate request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub ids: Vec<i32>,
}

/// Health check status for one dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCheckStatus {
    Ok,
    Error,
    /// Dependency not configured; absence is not a failure
    Skipped,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthCheck {
    pub fn ok(latency_ms: u64) -> Self {
        Self {
            status: HealthCheckStatus::Ok,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn error(latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            status: HealthCheckStatus::Error,
            latency_ms: Some(latency_ms),
            error: Some(error.into()),
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: HealthCheckStatus::Skipped,
            latency_ms: None,
            error: None,
        }
    }
}

/// Health endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub checks: BTreeMap<String, HealthCheck>,
}

impl HealthResponse {
    /// Aggregate: `ok` only when every check is ok or skipped
    pub fn from_checks(checks: BTreeMap<String, HealthCheck>) -> Self {
        let degraded = checks
            .values()
            .any(|check| check.status == HealthCheckStatus::Error);
        Self {
            status: if degraded { "degraded" } else { "ok" }.to_string(),
            checks,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_checks_do_not_degrade() {
        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), HealthCheck::ok(2));
        checks.insert("mail".to_string(), HealthCheck::skipped());
        assert!(HealthResponse::from_checks(checks).is_ok());
    }

    #[test]
    fn test_any_error_degrades() {
        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), HealthCheck::error(5, "down"));
        assert!(!HealthResponse::from_checks(checks).is_ok());
    }
}
