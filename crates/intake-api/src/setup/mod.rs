//! Application setup and initialization
//!
//! Everything built here is created once at startup and shared read-only.

pub mod email;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::services::IntakeService;
use crate::state::AppState;
use anyhow::{Context, Result};
use intake_core::Config;
use intake_storage::StorageWriter;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;
    let notifier = email::setup_notifier(&config).await;

    let intake = IntakeService::new(config.api_key(), StorageWriter::new(storage), notifier);
    let state = AppState::new(config.clone(), intake);

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
