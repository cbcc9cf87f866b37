// src/health/status.rs
use super::report::CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Error,
    Skipped,
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "ok",
            CheckStatus::Error => "error",
            CheckStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Ok,
    Error,
}

impl OverallStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, OverallStatus::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Ok => "ok",
            OverallStatus::Error => "error",
        }
    }
}

/// Overall verdict over the critical tier. Skipped counts as a failure.
pub fn aggregate(critical_results: &[CheckResult]) -> OverallStatus {
    if critical_results.iter().all(|result| result.status.is_ok()) {
        OverallStatus::Ok
    } else {
        OverallStatus::Error
    }
}
