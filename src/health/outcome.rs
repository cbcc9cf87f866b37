// src/health/outcome.rs
use super::check::CheckSpec;
use crate::config::OutcomeKind;
use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;

/// Raw simulated outcome before the timeout rule and message wording apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub latency_ms: u64,
    pub failed: bool,
}

/// Outcome-distribution policy attached to each check at registry construction.
pub trait OutcomeModel: Send + Sync + fmt::Debug {
    fn draw(&self, spec: &CheckSpec, rng: &mut dyn RngCore) -> Draw;

    fn name(&self) -> &'static str;
}

/// Uniform latency over the check's range, Bernoulli failure at its probability.
#[derive(Debug, Default)]
pub struct UniformOutcome;

impl OutcomeModel for UniformOutcome {
    fn draw(&self, spec: &CheckSpec, rng: &mut dyn RngCore) -> Draw {
        let (min, max) = spec.latency_range_ms;
        let latency_ms = rng.gen_range(min..=max);
        let failed = rng.gen_bool(spec.failure_probability);

        Draw { latency_ms, failed }
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Always yields the same draw. Consumes no randomness.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome {
    draw: Draw,
}

impl FixedOutcome {
    pub fn new(latency_ms: u64, failed: bool) -> Self {
        Self {
            draw: Draw { latency_ms, failed },
        }
    }

    pub fn passing(latency_ms: u64) -> Self {
        Self::new(latency_ms, false)
    }

    pub fn failing(latency_ms: u64) -> Self {
        Self::new(latency_ms, true)
    }
}

impl OutcomeModel for FixedOutcome {
    fn draw(&self, _spec: &CheckSpec, _rng: &mut dyn RngCore) -> Draw {
        self.draw
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub fn create_outcome_model(
    kind: OutcomeKind,
    latency_ms: u64,
    failed: bool,
) -> Arc<dyn OutcomeModel> {
    match kind {
        OutcomeKind::Uniform => Arc::new(UniformOutcome),
        OutcomeKind::Fixed => Arc::new(FixedOutcome::new(latency_ms, failed)),
    }
}
