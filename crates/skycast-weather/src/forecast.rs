//! Daily summary of the 3-hour forecast.

use chrono::{Local, TimeZone, Timelike};

use crate::helpers::to_zone;
use crate::types::{ForecastEntry, ForecastResponse};

/// Hour of day (in the viewer's zone) whose step represents a day
pub const DAILY_FORECAST_HOUR: u32 = 12;

pub const DAILY_FORECAST_DAYS: usize = 5;

/// Entries whose time falls on [`DAILY_FORECAST_HOUR`] in `tz`, in order, at most
/// [`DAILY_FORECAST_DAYS`] of them.
///
/// Zones whose offset is not a multiple of three hours from the provider's
/// UTC grid can yield fewer days, or none.
pub fn daily_forecast_in<'a, Tz: TimeZone>(
    entries: &'a [ForecastEntry],
    tz: &Tz,
) -> Vec<&'a ForecastEntry> {
    entries
        .iter()
        .filter(|entry| {
            to_zone(entry.dt, tz).is_some_and(|local| local.hour() == DAILY_FORECAST_HOUR)
        })
        .take(DAILY_FORECAST_DAYS)
        .collect()
}

impl ForecastResponse {
    /// One entry per day, picked in the local time zone
    pub fn daily(&self) -> Vec<&ForecastEntry> {
        daily_forecast_in(&self.list, &Local)
    }
}
