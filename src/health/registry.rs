// src/health/registry.rs
use super::check::CheckSpec;
use crate::config::{CheckConfig, Tier};
use std::collections::{HashMap, HashSet};
use tracing::info;

pub const INTERNAL_APIS: [&str; 2] = ["billing", "usage"];
pub const EXTERNAL_APIS: [&str; 2] = ["alipay", "sms"];

const API_FAILURE_PROBABILITY: f64 = 0.13;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate check name: {0}")]
    DuplicateCheck(String),

    #[error("Check {check} depends on unknown check {dependency}")]
    UnknownDependency { check: String, dependency: String },

    #[error("External check {0} cannot declare dependencies")]
    ExternalWithDependencies(String),

    #[error("Check {check} cannot depend on external check {dependency}")]
    DependsOnExternal { check: String, dependency: String },

    #[error("Dependency cycle involving: {0}")]
    Cycle(String),

    #[error("Check {name} has failure probability {value} outside [0, 1]")]
    InvalidProbability { name: String, value: f64 },

    #[error("Check {name} has latency range {min}..={max} with min > max")]
    InvalidLatencyRange { name: String, min: u64, max: u64 },
}

/// Read-only set of checks, validated once and shared across requests.
#[derive(Debug)]
pub struct CheckRegistry {
    checks: Vec<CheckSpec>,
    // Indices of critical checks, every dependency before its dependents.
    critical_order: Vec<usize>,
}

impl CheckRegistry {
    pub fn new(checks: Vec<CheckSpec>) -> Result<Self, RegistryError> {
        let mut tiers = HashMap::new();
        for check in &checks {
            if tiers.insert(check.name.as_str(), check.tier).is_some() {
                return Err(RegistryError::DuplicateCheck(check.name.clone()));
            }
        }

        for check in &checks {
            check.validate()?;

            if check.tier == Tier::External && !check.is_root() {
                return Err(RegistryError::ExternalWithDependencies(check.name.clone()));
            }

            for dependency in &check.depends_on {
                match tiers.get(dependency.as_str()) {
                    None => {
                        return Err(RegistryError::UnknownDependency {
                            check: check.name.clone(),
                            dependency: dependency.clone(),
                        })
                    }
                    Some(Tier::External) => {
                        return Err(RegistryError::DependsOnExternal {
                            check: check.name.clone(),
                            dependency: dependency.clone(),
                        })
                    }
                    Some(Tier::Critical) => {}
                }
            }
        }

        let critical_order = dependency_order(&checks)?;

        Ok(Self {
            checks,
            critical_order,
        })
    }

    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(Self::default_checks())
    }

    pub fn from_config(configs: &[CheckConfig]) -> Result<Self, RegistryError> {
        Self::new(configs.iter().map(CheckSpec::from_config).collect())
    }

    /// The built-in registry: two infrastructure roots, internal APIs gated on
    /// both, and independent external APIs.
    pub fn default_checks() -> Vec<CheckSpec> {
        let mut checks = vec![
            CheckSpec::infrastructure(
                "db_connection",
                "Database is connected",
                "Database connection failed",
            ),
            CheckSpec::infrastructure(
                "config_service",
                "Config service is reachable",
                "Config service error",
            ),
        ];

        for api in INTERNAL_APIS {
            checks.push(
                CheckSpec::builder(format!("internal_api/{}", api), Tier::Critical)
                    .failure_probability(API_FAILURE_PROBABILITY)
                    .depends_on(["db_connection", "config_service"])
                    .build(),
            );
        }

        for api in EXTERNAL_APIS {
            checks.push(
                CheckSpec::builder(format!("external_api/{}", api), Tier::External)
                    .failure_probability(API_FAILURE_PROBABILITY)
                    .build(),
            );
        }

        checks
    }

    pub fn get(&self, name: &str) -> Option<&CheckSpec> {
        self.checks.iter().find(|check| check.name == name)
    }

    pub fn critical(&self) -> impl Iterator<Item = &CheckSpec> {
        self.checks.iter().filter(|check| check.tier == Tier::Critical)
    }

    pub fn external(&self) -> impl Iterator<Item = &CheckSpec> {
        self.checks.iter().filter(|check| check.tier == Tier::External)
    }

    /// Critical checks in evaluation order.
    pub fn critical_in_dependency_order(&self) -> impl Iterator<Item = &CheckSpec> {
        self.critical_order.iter().map(move |&index| &self.checks[index])
    }

    pub fn log_summary(&self) {
        for check in &self.checks {
            info!(
                check = %check.name,
                tier = check.tier.as_str(),
                failure_probability = check.failure_probability,
                depends_on = ?check.depends_on,
                "Registered check"
            );
        }
    }
}

/// Layered topological sort over the critical tier: each pass takes, in
/// registry order, every check whose dependencies are already placed.
fn dependency_order(checks: &[CheckSpec]) -> Result<Vec<usize>, RegistryError> {
    let mut pending: Vec<usize> = checks
        .iter()
        .enumerate()
        .filter(|(_, check)| check.tier == Tier::Critical)
        .map(|(index, _)| index)
        .collect();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let ready: Vec<usize> = pending
            .iter()
            .copied()
            .filter(|&index| {
                checks[index]
                    .depends_on
                    .iter()
                    .all(|dependency| placed.contains(dependency.as_str()))
            })
            .collect();

        if ready.is_empty() {
            let stuck: Vec<&str> = pending.iter().map(|&i| checks[i].name.as_str()).collect();
            return Err(RegistryError::Cycle(stuck.join(", ")));
        }

        for &index in &ready {
            placed.insert(checks[index].name.as_str());
        }
        pending.retain(|index| !ready.contains(index));
        order.extend(ready);
    }

    Ok(order)
}
