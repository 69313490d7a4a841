//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use faceswap_core::Config;
use faceswap_services::{create_storage, GeminiClient, ImageGenerator};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let generator: Option<Arc<dyn ImageGenerator>> =
        match GeminiClient::from_config(&config.gemini)? {
            Some(client) => {
                tracing::info!(model = %config.gemini.model, "Gemini client initialized");
                Some(Arc::new(client))
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set; swap requests will fail");
                None
            }
        };

    let state = Arc::new(AppState::new(config.clone(), storage, generator));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
