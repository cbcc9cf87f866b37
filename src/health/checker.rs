// src/health/checker.rs
use super::evaluator::evaluate;
use super::registry::CheckRegistry;
use super::report::Report;
use super::status::aggregate;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces one fresh report per call. Only the registry is shared; each call
/// owns its random generator.
#[derive(Debug, Clone)]
pub struct HealthEngine {
    registry: Arc<CheckRegistry>,
}

impl HealthEngine {
    pub fn new(registry: Arc<CheckRegistry>) -> Self {
        Self { registry }
    }

    pub fn report(&self) -> Report {
        let mut rng = StdRng::from_entropy();
        self.report_with_rng(&mut rng)
    }

    pub fn report_with_rng(&self, rng: &mut dyn RngCore) -> Report {
        let (critical_results, external_results) = evaluate(&self.registry, rng);
        let overall_status = aggregate(&critical_results);

        let report = Report {
            overall_status,
            critical_results,
            external_results,
            generated_at: Utc::now(),
        };

        for failed in report.failed_critical() {
            warn!(
                check = %failed.name,
                status = failed.status.as_str(),
                "Critical check not ok: {}",
                failed.message
            );
        }

        let external_failures = report
            .external_results
            .iter()
            .filter(|result| !result.status.is_ok())
            .count();

        debug!(
            "Health report complete: overall {}, {} critical failing, {} external failing",
            report.overall_status.as_str(),
            report.failed_critical().count(),
            external_failures
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tier;
    use crate::health::check::CheckSpec;
    use crate::health::outcome::FixedOutcome;
    use crate::health::status::{CheckStatus, OverallStatus};
    use hyper::StatusCode;

    fn engine(checks: Vec<CheckSpec>) -> HealthEngine {
        HealthEngine::new(Arc::new(CheckRegistry::new(checks).unwrap()))
    }

    fn fixed(name: &str, tier: Tier, failed: bool) -> CheckSpec {
        CheckSpec::builder(name, tier)
            .outcome(FixedOutcome::new(100, failed))
            .build()
    }

    #[test]
    fn test_builtin_report_shape() {
        let engine = HealthEngine::new(Arc::new(CheckRegistry::builtin().unwrap()));
        let report = engine.report();

        assert_eq!(report.critical_results.len(), 4);
        assert_eq!(report.external_results.len(), 2);
        assert_eq!(report.critical_results[0].name, "db_connection");
        assert_eq!(report.critical_results[0].message, "Database is connected");
        assert_eq!(report.critical_results[1].message, "Config service is reachable");
        assert_eq!(report.overall_status, aggregate(&report.critical_results));
    }

    #[test]
    fn test_external_failure_never_flips_overall() {
        let engine = engine(vec![
            fixed("db_connection", Tier::Critical, false),
            fixed("external_api/sms", Tier::External, true),
        ]);
        let report = engine.report();

        assert_eq!(report.external_results[0].status, CheckStatus::Error);
        assert_eq!(report.overall_status, OverallStatus::Ok);
        assert_eq!(report.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_critical_failure_maps_to_500() {
        let engine = engine(vec![fixed("db_connection", Tier::Critical, true)]);
        let report = engine.report();

        assert_eq!(report.overall_status, OverallStatus::Error);
        assert_eq!(report.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_concurrent_reports_are_independent() {
        let engine = HealthEngine::new(Arc::new(CheckRegistry::builtin().unwrap()));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move { engine.report() })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            let report = result.unwrap();
            assert_eq!(report.critical_results.len(), 4);
            assert_eq!(report.external_results.len(), 2);
        }
    }
}
