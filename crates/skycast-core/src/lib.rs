//! Core plumbing for the SkyCast weather client: configuration, the
//! centralized error taxonomy, and logging initialization.

pub mod config;
pub mod error;

pub use config::{Config, ForecastConfig, ProviderConfig, ValidationResult};
pub use error::{AppError, AuthError, ReqwestErrorExt, StorageError, WeatherError};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("SkyCast core initialized");
    Ok(())
}
