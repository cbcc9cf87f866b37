// src/health/simulator.rs
use super::check::CheckSpec;
use super::report::CheckResult;
use super::status::CheckStatus;
use rand::RngCore;
use tracing::debug;

/// Run one simulated check. Latency is a computed value; nothing sleeps.
///
/// `spec` must pass [`CheckSpec::validate`], which every registry entry has.
/// The uniform model panics on a probability outside `[0, 1]` or an inverted
/// latency range.
pub fn simulate(spec: &CheckSpec, rng: &mut dyn RngCore) -> CheckResult {
    let draw = spec.outcome.draw(spec, rng);

    let (status, message) = if draw.latency_ms > spec.timeout_threshold_ms {
        (CheckStatus::Error, format!("{} timed out", spec.name))
    } else if draw.failed {
        let message = match &spec.messages {
            Some(messages) => messages.error.clone(),
            None => format!("{} returned error", spec.name),
        };
        (CheckStatus::Error, message)
    } else {
        let message = match &spec.messages {
            Some(messages) => messages.ok.clone(),
            None => format!("{} OK ({}ms)", spec.name, draw.latency_ms),
        };
        (CheckStatus::Ok, message)
    };

    debug!(
        check = %spec.name,
        model = spec.outcome.name(),
        latency_ms = draw.latency_ms,
        status = status.as_str(),
        "Simulated check"
    );

    CheckResult {
        name: spec.name.clone(),
        status,
        message,
        latency_ms: Some(draw.latency_ms),
    }
}
