//! Pure presentation helpers.

use chrono::{DateTime, Local, TimeZone, Utc};
use skycast_core::TemperatureUnit;

/// Key value shipped in sample configuration; treated as "no key".
pub const API_KEY_PLACEHOLDER: &str = "demo_key_please_replace";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Convert a Celsius reading for display, rounded to the nearest degree (halves round up).
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> i64 {
    let value = match unit {
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Celsius => celsius,
    };
    (value + 0.5).floor() as i64
}

/// e.g. "Monday, Jan 15" in the local time zone
pub fn format_date(timestamp: i64) -> String {
    format_date_in(timestamp, &Local)
}

pub fn format_date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    to_zone(timestamp, tz)
        .map(|dt| dt.format("%A, %b %-d").to_string())
        .unwrap_or_default()
}

/// e.g. "02:30 PM" in the local time zone
pub fn format_time(timestamp: i64) -> String {
    format_time_in(timestamp, &Local)
}

pub fn format_time_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    to_zone(timestamp, tz)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

pub(crate) fn to_zone<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz))
}

/// Icon image URL for a provider icon code such as `"10d"`
pub fn weather_icon_url(icon_code: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE_URL, icon_code)
}

/// Uppercase the first character of every run of word characters (`[A-Za-z0-9_]`).
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

/// Day name for a 0-based weekday index, Sunday first
pub fn day_name(index: usize) -> Option<&'static str> {
    DAY_NAMES.get(index).copied()
}

/// True when a real key is present: not empty and not the sample placeholder.
pub fn is_api_key_configured(api_key: Option<&str>) -> bool {
    api_key
        .map(str::trim)
        .is_some_and(|key| !key.is_empty() && key != API_KEY_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    // 2024-01-15 14:30:00 UTC, a Monday
    const MONDAY_AFTERNOON: i64 = 1_705_329_000;

    #[test]
    fn test_convert_boundaries() {
        assert_eq!(convert_temperature(0.0, TemperatureUnit::Fahrenheit), 32);
        assert_eq!(convert_temperature(100.0, TemperatureUnit::Celsius), 100);
        assert_eq!(convert_temperature(-40.0, TemperatureUnit::Fahrenheit), -40);
        assert_eq!(convert_temperature(100.0, TemperatureUnit::Fahrenheit), 212);
    }

    #[test]
    fn test_convert_rounds() {
        assert_eq!(convert_temperature(11.42, TemperatureUnit::Celsius), 11);
        assert_eq!(convert_temperature(11.5, TemperatureUnit::Celsius), 12);
        assert_eq!(convert_temperature(-2.5, TemperatureUnit::Celsius), -2);
        assert_eq!(convert_temperature(11.42, TemperatureUnit::Fahrenheit), 53);
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(format_date_in(MONDAY_AFTERNOON, &Utc), "Monday, Jan 15");
    }

    #[test]
    fn test_format_time_utc() {
        assert_eq!(format_time_in(MONDAY_AFTERNOON, &Utc), "02:30 PM");
    }

    #[test]
    fn test_format_respects_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(MONDAY_AFTERNOON, &tokyo), "Monday, Jan 15");
        assert_eq!(format_time_in(MONDAY_AFTERNOON, &tokyo), "11:30 PM");

        let honolulu = FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(format_time_in(MONDAY_AFTERNOON, &honolulu), "04:30 AM");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            weather_icon_url("10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("broken clouds"), "Broken Clouds");
        assert_eq!(capitalize_words("light-rain and snow"), "Light-Rain And Snow");
        assert_eq!(capitalize_words("  already Up"), "  Already Up");
        assert_eq!(capitalize_words("o'neil"), "O'Neil");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_capitalize_digits_start_a_word() {
        assert_eq!(capitalize_words("3rd street"), "3rd Street");
    }

    #[test]
    fn test_day_name() {
        assert_eq!(day_name(0), Some("Sunday"));
        assert_eq!(day_name(6), Some("Saturday"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn test_api_key_configured() {
        assert!(is_api_key_configured(Some("0123abcd")));
        assert!(!is_api_key_configured(Some(API_KEY_PLACEHOLDER)));
        assert!(!is_api_key_configured(Some("")));
        assert!(!is_api_key_configured(Some("   ")));
        assert!(!is_api_key_configured(None));
    }
}
