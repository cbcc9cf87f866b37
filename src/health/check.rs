// src/health/check.rs
use super::outcome::{create_outcome_model, OutcomeModel, UniformOutcome};
use super::registry::RegistryError;
use crate::config::{CheckConfig, StaticMessages, Tier};
use std::collections::BTreeSet;
use std::sync::Arc;

const DEFAULT_LATENCY_RANGE_MS: (u64, u64) = (50, 500);
const DEFAULT_TIMEOUT_THRESHOLD_MS: u64 = 491;

/// Immutable definition of one check. Lives in the registry for the whole process.
#[derive(Debug, Clone)]
pub struct CheckSpec {
    pub name: String,
    pub tier: Tier,
    pub failure_probability: f64,
    pub latency_range_ms: (u64, u64),
    pub timeout_threshold_ms: u64,
    pub depends_on: BTreeSet<String>,
    /// Replaces the generated ok/error wording (timeouts keep theirs).
    pub messages: Option<StaticMessages>,
    pub outcome: Arc<dyn OutcomeModel>,
}

impl CheckSpec {
    pub fn builder(name: impl Into<String>, tier: Tier) -> CheckSpecBuilder {
        CheckSpecBuilder::new(name.into(), tier)
    }

    /// Always-available core infrastructure: never fails with default parameters.
    pub fn infrastructure(
        name: impl Into<String>,
        ok_message: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self::builder(name, Tier::Critical)
            .failure_probability(0.0)
            .latency_range_ms(0, 0)
            .timeout_threshold_ms(0)
            .messages(ok_message, error_message)
            .build()
    }

    pub fn from_config(config: &CheckConfig) -> Self {
        Self {
            name: config.name.clone(),
            tier: config.tier,
            failure_probability: config.failure_probability,
            latency_range_ms: (config.latency_ms.min, config.latency_ms.max),
            timeout_threshold_ms: config.timeout_threshold_ms,
            depends_on: config.depends_on.iter().cloned().collect(),
            messages: config.messages.clone(),
            outcome: create_outcome_model(
                config.outcome,
                config.fixed_latency_ms,
                config.fixed_failed,
            ),
        }
    }

    pub fn is_root(&self) -> bool {
        self.depends_on.is_empty()
    }

    /// Checks the parameter ranges the uniform draw relies on. The registry
    /// runs this for every entry.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let p = self.failure_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(RegistryError::InvalidProbability {
                name: self.name.clone(),
                value: p,
            });
        }

        let (min, max) = self.latency_range_ms;
        if min > max {
            return Err(RegistryError::InvalidLatencyRange {
                name: self.name.clone(),
                min,
                max,
            });
        }

        Ok(())
    }
}

pub struct CheckSpecBuilder {
    spec: CheckSpec,
}

impl CheckSpecBuilder {
    fn new(name: String, tier: Tier) -> Self {
        Self {
            spec: CheckSpec {
                name,
                tier,
                failure_probability: 0.0,
                latency_range_ms: DEFAULT_LATENCY_RANGE_MS,
                timeout_threshold_ms: DEFAULT_TIMEOUT_THRESHOLD_MS,
                depends_on: BTreeSet::new(),
                messages: None,
                outcome: Arc::new(UniformOutcome),
            },
        }
    }

    pub fn failure_probability(mut self, probability: f64) -> Self {
        self.spec.failure_probability = probability;
        self
    }

    pub fn latency_range_ms(mut self, min: u64, max: u64) -> Self {
        self.spec.latency_range_ms = (min, max);
        self
    }

    pub fn timeout_threshold_ms(mut self, threshold: u64) -> Self {
        self.spec.timeout_threshold_ms = threshold;
        self
    }

    pub fn depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.depends_on.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn messages(mut self, ok: impl Into<String>, error: impl Into<String>) -> Self {
        self.spec.messages = Some(StaticMessages {
            ok: ok.into(),
            error: error.into(),
        });
        self
    }

    /// Swap the outcome policy, e.g. a `FixedOutcome` in tests.
    pub fn outcome(mut self, outcome: impl OutcomeModel + 'static) -> Self {
        self.spec.outcome = Arc::new(outcome);
        self
    }

    pub fn build(self) -> CheckSpec {
        self.spec
    }
}
