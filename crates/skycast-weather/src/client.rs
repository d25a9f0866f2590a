//! OpenWeatherMap API client.
//!
//! Thin wrappers that forward parameters to the provider. There is no cache
//! and no retry; each call is exactly one HTTP request.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use skycast_core::WeatherConfig;
use tracing::instrument;

use crate::error::{WeatherError, DEFAULT_FAILURE_MESSAGE};
use crate::helpers::is_api_key_configured;
use crate::types::{ApiErrorBody, CurrentWeather, FindResponse, ForecastResponse};

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

/// Temperatures always come back in Celsius; conversion happens at display time.
const UNITS: &str = "metric";

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        is_api_key_configured(Some(&self.api_key))
    }

    /// Current weather for a city name.
    #[instrument(skip(self), level = "info")]
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        self.get("weather", &[("q", city.to_string())], Failure::Provider(DEFAULT_FAILURE_MESSAGE))
            .await
    }

    /// Current weather for a city name, as the provider sent it.
    ///
    /// Same request as [`current_weather`](Self::current_weather); the body is
    /// kept as JSON so fields SkyCast does not model survive unchanged.
    #[instrument(skip(self), level = "info")]
    pub async fn current_weather_raw(&self, city: &str) -> Result<Value, WeatherError> {
        self.get("weather", &[("q", city.to_string())], Failure::Provider(DEFAULT_FAILURE_MESSAGE))
            .await
    }

    /// 5-day forecast in 3-hour steps for a city name.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        self.get(
            "forecast",
            &[("q", city.to_string())],
            Failure::Provider("Failed to fetch forecast data"),
        )
            .await
    }

    /// Current weather at a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn weather_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        self.get(
            "weather",
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
            Failure::Fixed("Failed to fetch weather by location"),
        )
        .await
    }

    /// Cities whose name matches `query`, each with its current weather.
    #[instrument(skip(self), level = "info")]
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CurrentWeather>, WeatherError> {
        let found: FindResponse = self
            .get("find", &[("q", query.to_string())], Failure::Fixed("Failed to search cities"))
            .await?;
        tracing::debug!("City search returned {} matches", found.list.len());
        Ok(found.list)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        failure: Failure,
    ) -> Result<T, WeatherError> {
        if !self.is_configured() {
            return Err(WeatherError::NotConfigured);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        handle_response(response, failure).await
    }
}

/// How a failed call is described when the provider rejects it.
#[derive(Debug, Clone, Copy)]
enum Failure {
    /// Use the provider's `message` when it sends one, else this text.
    Provider(&'static str),
    /// Always this text.
    Fixed(&'static str),
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    failure: Failure,
) -> Result<T, WeatherError> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        return serde_json::from_slice(&body).map_err(|e| WeatherError::Parse(e.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(WeatherError::RateLimited(retry_after));
    }

    let message = response
        .json::<ApiErrorBody>()
        .await
        .unwrap_or_default()
        .message
        .filter(|m| !m.trim().is_empty());

    tracing::warn!(status = status.as_u16(), message = ?message, "Weather API request failed");

    let text = match failure {
        Failure::Fixed(text) => text.to_string(),
        Failure::Provider(fallback) => message.unwrap_or_else(|| {
            let default = if status == StatusCode::NOT_FOUND {
                "city not found"
            } else {
                fallback
            };
            default.to_string()
        }),
    };

    match status {
        StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
        StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(text)),
        _ => Err(WeatherError::Api(text)),
    }
}
