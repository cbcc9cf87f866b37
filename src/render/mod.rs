// src/render/mod.rs
mod json;
mod prometheus;
mod text;

pub use self::json::render_json;
pub use self::prometheus::{render_prometheus, CONTENT_TYPE as PROMETHEUS_CONTENT_TYPE};
pub use self::text::render_text;

use crate::health::CheckStatus;
use std::str::FromStr;

/// Every rendered surface is binary: only `ok` passes, and a skipped check is
/// published as a failure. The skip message stays in the row to say why.
pub fn passed(status: CheckStatus) -> bool {
    matches!(status, CheckStatus::Ok)
}

/// `ok` / `error` as published in JSON.
pub fn wire_status(status: CheckStatus) -> &'static str {
    if passed(status) {
        "ok"
    } else {
        "error"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metrics encoding failed: {0}")]
    Metrics(#[from] ::prometheus::Error),

    #[error("Metrics output was not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// `/healthz` output format, from the `format` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl Format {
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Text => "text/plain; charset=utf-8",
            Format::Json => "application/json",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported format: {0} (expected text or json)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}
