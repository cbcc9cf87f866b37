// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

const ENV_PREFIX: &str = "HEALTHZ";

/// Load configuration from an optional file (YAML, JSON or TOML by extension)
/// layered under `HEALTHZ_*` environment overrides.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    load_config_with_prefix(path, ENV_PREFIX)
}

fn load_config_with_prefix<P: AsRef<Path>>(path: Option<P>, env_prefix: &str) -> Result<Config> {
    let mut builder = ::config::Config::builder();

    if let Some(path) = path {
        let path = path.as_ref();
        builder = builder.add_source(::config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            ::config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read configuration")?;

    let config: Config = settings
        .try_deserialize()
        .context("Failed to parse configuration")?;

    config.validate()?;
    Ok(config)
}
