// src/render/prometheus.rs
use super::{passed, RenderError};
use crate::config::Tier;
use crate::health::{CheckResult, Report};
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

const METRIC_NAME: &str = "healthcheck_status";
const METRIC_HELP: &str = "Health check status (1=ok,0=error)";

/// One `healthcheck_status` gauge per check, labelled by check name and tier.
///
/// Each call builds a throwaway registry so reports never leak into each
/// other. Samples come out sorted by label values.
pub fn render_prometheus(report: &Report) -> Result<String, RenderError> {
    let registry = Registry::new();
    let status = IntGaugeVec::new(Opts::new(METRIC_NAME, METRIC_HELP), &["check", "type"])?;
    registry.register(Box::new(status.clone()))?;

    record(&status, &report.critical_results, Tier::Critical);
    record(&status, &report.external_results, Tier::External);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn record(gauge: &IntGaugeVec, results: &[CheckResult], tier: Tier) {
    for result in results {
        let value = if passed(result.status) { 1 } else { 0 };
        gauge
            .with_label_values(&[result.name.as_str(), tier.as_str()])
            .set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::failing_report;

    #[test]
    fn test_exposition_lines() {
        let text = render_prometheus(&failing_report()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "# HELP healthcheck_status Health check status (1=ok,0=error)"
        );
        assert_eq!(lines[1], "# TYPE healthcheck_status gauge");
        assert_eq!(lines.len(), 2 + 6);

        assert!(lines.contains(&r#"healthcheck_status{check="db_connection",type="critical"} 0"#));
        assert!(lines.contains(&r#"healthcheck_status{check="config_service",type="critical"} 1"#));
        assert!(lines.contains(&r#"healthcheck_status{check="internal_api/usage",type="critical"} 0"#));
        assert!(lines.contains(&r#"healthcheck_status{check="external_api/alipay",type="external"} 1"#));
        assert!(lines.contains(&r#"healthcheck_status{check="external_api/sms",type="external"} 0"#));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let report = failing_report();
        assert_eq!(
            render_prometheus(&report).unwrap(),
            render_prometheus(&report).unwrap()
        );
    }
}
