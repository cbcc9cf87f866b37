// src/render/json.rs
use super::{wire_status, RenderError};
use crate::health::{CheckResult, Report};
use chrono::SecondsFormat;
use serde::Serialize;

const ALL_PASSED: &str = "All critical checks passed";
const SOME_FAILED: &str = "Some critical checks failed";

#[derive(Serialize)]
struct Body<'a> {
    status: &'static str,
    data: Data<'a>,
}

#[derive(Serialize)]
struct Data<'a> {
    message: &'static str,
    snapshot_time: String,
    checks: Checks<'a>,
}

#[derive(Serialize)]
struct Checks<'a> {
    critical: Vec<Entry<'a>>,
    external: Vec<Entry<'a>>,
}

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    status: &'static str,
    message: &'a str,
}

pub fn render_json(report: &Report) -> Result<String, RenderError> {
    let body = Body {
        status: report.overall_status.as_str(),
        data: Data {
            message: if report.overall_status.is_ok() {
                ALL_PASSED
            } else {
                SOME_FAILED
            },
            snapshot_time: report
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            checks: Checks {
                critical: entries(&report.critical_results),
                external: entries(&report.external_results),
            },
        },
    };

    Ok(serde_json::to_string_pretty(&body)?)
}

fn entries(results: &[CheckResult]) -> Vec<Entry<'_>> {
    results
        .iter()
        .map(|result| Entry {
            name: &result.name,
            status: wire_status(result.status),
            message: &result.message,
        })
        .collect()
}
