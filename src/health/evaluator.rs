// src/health/evaluator.rs
use super::registry::CheckRegistry;
use super::report::CheckResult;
use super::simulator::simulate;
use rand::RngCore;
use std::collections::HashMap;
use tracing::debug;

/// Run every check once, returning `(critical, external)` results in registry order.
///
/// Critical checks are visited in dependency order. A check with any upstream
/// result other than ok is recorded as skipped and never simulated, so a
/// failure propagates to every direct and transitive dependent. External
/// checks always run and gate nothing.
pub fn evaluate(
    registry: &CheckRegistry,
    rng: &mut dyn RngCore,
) -> (Vec<CheckResult>, Vec<CheckResult>) {
    let mut outcomes: HashMap<&str, CheckResult> = HashMap::new();

    for spec in registry.critical_in_dependency_order() {
        let upstream_ok = spec.depends_on.iter().all(|dependency| {
            outcomes
                .get(dependency.as_str())
                .map(|result| result.status.is_ok())
                .unwrap_or(false)
        });

        let result = if upstream_ok {
            simulate(spec, rng)
        } else {
            debug!(check = %spec.name, "Skipping check, upstream dependency not ok");
            CheckResult::skipped(spec.name.clone())
        };

        outcomes.insert(spec.name.as_str(), result);
    }

    let critical = registry
        .critical()
        .filter_map(|spec| outcomes.remove(spec.name.as_str()))
        .collect();

    let external = registry
        .external()
        .map(|spec| simulate(spec, rng))
        .collect();

    (critical, external)
}
