//! Anomaly classification service
//!
//! Exposes the statistical temperature classifier over HTTP alongside
//! health, readiness, and Prometheus metrics endpoints.

use anyhow::{Context, Result};
use classifier_lib::{
    health::{components, HealthRegistry},
    observability::{ServiceMetrics, StructuredLogger},
    AnomalyService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting anomaly-service");

    // Load configuration and validate the classifier thresholds up front
    let settings = config::ServiceSettings::load()?;
    let service = AnomalyService::new(settings.classifier_configuration())
        .context("Invalid classifier configuration")?;
    info!(site = %settings.site_name, "Classifier configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::CLASSIFIER).await;
    health_registry.register(components::CONFIG).await;

    // Initialize metrics with the active thresholds
    let metrics = ServiceMetrics::new();
    let cfg = service.configuration();
    metrics.set_threshold_info(
        cfg.reference_temperature,
        cfg.warning_threshold,
        cfg.critical_threshold,
    );

    // Initialize structured logger
    let logger = StructuredLogger::new(&settings.site_name);
    logger.log_startup(SERVICE_VERSION);

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        Arc::new(service),
        health_registry.clone(),
        metrics.clone(),
        logger.clone(),
    ));

    // The classifier is ready synchronously once constructed
    health_registry.set_ready(true).await;

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(settings.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}
