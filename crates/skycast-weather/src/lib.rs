//! Weather data for SkyCast.
//!
//! An OpenWeatherMap client, the response types it decodes, and the pure
//! helpers views use to present them (unit conversion, date formatting,
//! icon URLs, daily forecast selection).

pub mod client;
pub mod error;
pub mod forecast;
pub mod helpers;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use forecast::{daily_forecast_in, DAILY_FORECAST_DAYS, DAILY_FORECAST_HOUR};
pub use helpers::{
    capitalize_words, convert_temperature, day_name, format_date, format_date_in, format_time,
    format_time_in, is_api_key_configured, weather_icon_url, API_KEY_PLACEHOLDER,
};
pub use types::*;
