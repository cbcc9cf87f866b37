// src/health/mod.rs
mod check;
mod checker;
mod evaluator;
mod outcome;
mod registry;
mod report;
mod simulator;
mod status;

pub use check::{CheckSpec, CheckSpecBuilder};
pub use checker::HealthEngine;
pub use evaluator::evaluate;
pub use outcome::{create_outcome_model, Draw, FixedOutcome, OutcomeModel, UniformOutcome};
pub use registry::{CheckRegistry, RegistryError, EXTERNAL_APIS, INTERNAL_APIS};
pub use report::{CheckResult, Report, SKIPPED_MESSAGE};
pub use simulator::simulate;
pub use status::{aggregate, CheckStatus, OverallStatus};
