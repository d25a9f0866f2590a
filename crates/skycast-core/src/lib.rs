pub mod config;
pub mod error;
pub mod units;

pub use config::{Config, StorageBackend, StorageConfig, UiConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, NetworkError, StorageError, WeatherError};
pub use units::{ParseUnitError, TemperatureUnit};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
