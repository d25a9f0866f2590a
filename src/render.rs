//! Plain-text cards for terminal output.

use chrono::TimeZone;
use skycast_core::TemperatureUnit;
use skycast_prefs::FavoriteCity;
use skycast_weather::{
    capitalize_words, convert_temperature, format_date_in, format_time_in, weather_icon_url,
    ConditionGroup, CurrentWeather, ForecastEntry,
};

fn degrees(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", convert_temperature(celsius, unit), unit)
}

/// Current conditions: place, description, temperatures and readings.
pub fn weather_card(weather: &CurrentWeather, unit: TemperatureUnit) -> String {
    let condition = weather.condition();
    let glyph = condition.map_or(ConditionGroup::default(), |c| c.group()).glyph();

    let mut lines = vec![match weather.sys.country.as_deref() {
        Some(country) => format!("{} {}, {}", glyph, weather.name, country),
        None => format!("{} {}", glyph, weather.name),
    }];
    if let Some(condition) = condition {
        lines.push(format!("  {}", capitalize_words(&condition.description)));
    }
    lines.push(format!(
        "  {}  (feels like {})",
        degrees(weather.main.temp, unit),
        degrees(weather.main.feels_like, unit)
    ));
    lines.push(format!(
        "  Humidity {}%  Wind {} m/s  Pressure {} hPa",
        weather.main.humidity, weather.wind.speed, weather.main.pressure
    ));
    if let Some(condition) = condition {
        lines.push(format!("  {}", weather_icon_url(&condition.icon)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One daily forecast step, with its date and time shown in `tz`.
pub fn forecast_card<Tz: TimeZone>(entry: &ForecastEntry, unit: TemperatureUnit, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let description = entry
        .condition()
        .map(|c| c.description.as_str())
        .unwrap_or_default();

    format!(
        "{:<18} {:>8}  {:>5}  ↑{} ↓{}  {}%  {} m/s  {}",
        format_date_in(entry.dt, tz),
        format_time_in(entry.dt, tz),
        degrees(entry.main.temp, unit),
        convert_temperature(entry.main.temp_max, unit),
        convert_temperature(entry.main.temp_min, unit),
        entry.main.humidity,
        entry.wind.speed,
        description
    )
}

/// Short row for a stored favorite, from its snapshot.
pub fn favorite_row(city: &FavoriteCity, unit: TemperatureUnit) -> String {
    let name = city.name().unwrap_or("(unnamed)");
    let place = match city.country() {
        Some(country) => format!("{}, {}", name, country),
        None => name.to_string(),
    };
    let temp = city
        .snapshot
        .get("main")
        .and_then(|main| main.get("temp"))
        .and_then(serde_json::Value::as_f64)
        .map(|t| degrees(t, unit))
        .unwrap_or_else(|| "--".to_string());

    format!("{:>10}  {:<28} {}", city.id, place, temp)
}

/// A search result row for `find`.
pub fn match_row(weather: &CurrentWeather, unit: TemperatureUnit) -> String {
    let country = weather.sys.country.as_deref().unwrap_or("??");
    let coord = weather
        .coord
        .map(|c| format!("{:.2}, {:.2}", c.lat, c.lon))
        .unwrap_or_default();
    format!(
        "{:>10}  {}, {}  {}  {}",
        weather.id,
        weather.name,
        country,
        degrees(weather.main.temp, unit),
        coord
    )
}
