// src/render/text.rs
use super::passed;
use crate::health::{CheckResult, CheckStatus, Report};
use std::fmt::Write;

const NAME_WIDTH: usize = 24;
const STATUS_WIDTH: usize = 8;

/// Fixed-width table: critical section, then external.
pub fn render_text(report: &Report) -> String {
    // padding counts chars, not bytes
    let width = report
        .critical_results
        .iter()
        .chain(&report.external_results)
        .map(|result| result.name.chars().count() + 2)
        .fold(NAME_WIDTH, usize::max);

    let mut out = String::new();
    let _ = write!(
        out,
        "{:<width$}{:<status_width$}MESSAGE",
        "CHECK",
        "STATUS",
        width = width,
        status_width = STATUS_WIDTH
    );

    write_section(&mut out, "CRITICAL", &report.critical_results, width);
    write_section(&mut out, "EXTERNAL", &report.external_results, width);
    out
}

fn write_section(out: &mut String, title: &str, results: &[CheckResult], width: usize) {
    let _ = write!(out, "\n----- {} -----", title);
    for result in results {
        let _ = write!(
            out,
            "\n{:<width$}{:<status_width$}{}",
            result.name,
            glyph(result.status),
            result.message,
            width = width,
            status_width = STATUS_WIDTH
        );
    }
}

fn glyph(status: CheckStatus) -> &'static str {
    if passed(status) {
        "PASS"
    } else {
        "FAIL"
    }
}
