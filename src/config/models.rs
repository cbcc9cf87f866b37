// src/config/models.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,

    /// Replaces the built-in registry when present.
    pub checks: Option<Vec<CheckConfig>>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if let Some(checks) = &self.checks {
            if checks.is_empty() {
                bail!("checks must contain at least one entry when set");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))?;
        Ok(addr)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    External,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::External => "external",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    #[default]
    Uniform,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRange {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMessages {
    pub ok: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub name: String,
    pub tier: Tier,

    #[serde(default)]
    pub failure_probability: f64,

    #[serde(default = "default_latency")]
    pub latency_ms: LatencyRange,

    #[serde(default = "default_timeout_threshold_ms")]
    pub timeout_threshold_ms: u64,

    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub messages: Option<StaticMessages>,

    #[serde(default)]
    pub outcome: OutcomeKind,

    // Only read by the fixed outcome model.
    #[serde(default)]
    pub fixed_latency_ms: u64,
    #[serde(default)]
    pub fixed_failed: bool,
}

fn default_latency() -> LatencyRange {
    LatencyRange { min: 50, max: 500 }
}

fn default_timeout_threshold_ms() -> u64 {
    491
}
