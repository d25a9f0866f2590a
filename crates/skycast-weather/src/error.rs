//! Weather provider error types.

use skycast_core::{AppError, ConfigError, NetworkError};
use thiserror::Error;

/// Message used when the provider gives no reason for a failure
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Weather API key is not configured")]
    NotConfigured,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("Could not decode response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        use skycast_core::WeatherError as Core;
        match e {
            WeatherError::NotConfigured => {
                AppError::Config(ConfigError::MissingSetting("weather.api_key".into()))
            }
            WeatherError::InvalidApiKey => AppError::Weather(Core::InvalidApiKey),
            WeatherError::CityNotFound(msg) => AppError::Weather(Core::CityNotFound(msg)),
            WeatherError::RateLimited(secs) => AppError::Weather(Core::RateLimited(secs)),
            WeatherError::Api(msg) => AppError::Weather(Core::ApiError(msg)),
            WeatherError::Parse(msg) => AppError::Network(NetworkError::InvalidResponse(msg)),
            WeatherError::Network(e) if e.is_timeout() => AppError::Network(NetworkError::Timeout),
            WeatherError::Network(e) => match e.status() {
                Some(status) => AppError::Network(NetworkError::ServerError {
                    status: status.as_u16(),
                    message: e.to_string(),
                }),
                None => AppError::Network(NetworkError::ConnectionFailed(e.to_string())),
            },
        }
    }
}
