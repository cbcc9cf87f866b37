// src/health/report.rs
use super::status::{CheckStatus, OverallStatus};
use chrono::{DateTime, Utc};
use hyper::StatusCode;

pub const SKIPPED_MESSAGE: &str = "Skipped due to upstream failure";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    /// Present only when the check actually ran.
    pub latency_ms: Option<u64>,
}

impl CheckResult {
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Skipped,
            message: SKIPPED_MESSAGE.to_string(),
            latency_ms: None,
        }
    }
}

/// Per-request snapshot of every check plus the derived verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub overall_status: OverallStatus,
    pub critical_results: Vec<CheckResult>,
    pub external_results: Vec<CheckResult>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Status code the `/healthz` route must answer with.
    pub fn http_status(&self) -> StatusCode {
        match self.overall_status {
            OverallStatus::Ok => StatusCode::OK,
            OverallStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn failed_critical(&self) -> impl Iterator<Item = &CheckResult> {
        self.critical_results
            .iter()
            .filter(|result| !result.status.is_ok())
    }
}
