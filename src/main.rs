// src/main.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use mock_healthz::{
    config::{self, Config},
    health::{CheckRegistry, HealthEngine},
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mock_healthz=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Optional config file as the first argument
    let config_path = std::env::args().nth(1);
    match &config_path {
        Some(path) => info!("Loading configuration from: {}", path),
        None => info!("No configuration file given, using built-in defaults"),
    }
    let config = config::load_config(config_path.as_deref())?;

    let registry = Arc::new(build_registry(&config)?);
    registry.log_summary();

    let handler = RequestHandler::new(HealthEngine::new(registry));

    let addr = config.server.socket_addr()?;
    info!("Service endpoints available:");
    info!("  Healthcheck (Text):  http://{}/healthz", addr);
    info!("  Healthcheck (JSON):  http://{}/healthz?format=json", addr);
    info!("  Prometheus metrics:  http://{}/metrics", addr);

    ServerBuilder::new(addr)
        .with_handler(handler)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_registry(config: &Config) -> Result<CheckRegistry> {
    let registry = match &config.checks {
        Some(checks) => CheckRegistry::from_config(checks),
        None => CheckRegistry::builtin(),
    };
    registry.context("Invalid check registry")
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
