//! Deterministic reduction of a raw forecast series into view models:
//! current conditions, the hourly strip, and per-date daily aggregates.

use chrono::NaiveDate;

use skycast_core::{ForecastConfig, WeatherError};

use crate::condition::{BackgroundKey, IconKey};
use crate::types::{
    truncate_temp, CurrentConditions, DailyAggregate, HourlyEntry, RawSample, Units,
};

/// Number of samples shown in the hourly strip (24h at 3-hour resolution).
pub const HOURLY_WINDOW: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    /// Whether the partial group for the series' first calendar date is
    /// part of the daily output. The forecast view excludes it; a
    /// week-at-a-glance view wants it in.
    pub include_today: bool,
    /// Maximum number of daily aggregates.
    pub days: usize,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            include_today: false,
            days: 7,
        }
    }
}

impl From<&ForecastConfig> for ForecastOptions {
    fn from(config: &ForecastConfig) -> Self {
        Self {
            include_today: config.include_today,
            days: config.days as usize,
        }
    }
}

/// Everything the weather view binds to for one city.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyAggregate>,
}

/// Reduce a chronological series (first element = now) to view models.
///
/// The series must be non-empty; the provider contract guarantees at
/// least the current sample, so an empty list is a malformed payload.
pub fn normalize(
    samples: &[RawSample],
    units: Units,
    options: ForecastOptions,
) -> Result<Forecast, WeatherError> {
    let first = samples
        .first()
        .ok_or_else(|| WeatherError::Provider("empty forecast series".to_string()))?;

    Ok(Forecast {
        current: current_conditions(first, units),
        hourly: hourly_window(samples),
        daily: daily_aggregates(samples, options),
    })
}

/// Display projection of a single sample.
pub fn current_conditions(sample: &RawSample, units: Units) -> CurrentConditions {
    CurrentConditions {
        temperature: format!("{}{}", sample.temp as i64, units.temp_suffix()),
        feels_like: truncate_temp(sample.feels_like),
        humidity: format!("{}%", sample.humidity),
        wind_speed: format!("{} {}", sample.wind_speed, units.speed_suffix()),
        condition: sample.condition_main.clone(),
        icon: IconKey::for_condition(&sample.condition_main),
        background: BackgroundKey::for_conditions(&sample.condition_main, &sample.icon_code),
    }
}

/// First `min(8, len)` samples. A short series just yields a short strip.
pub fn hourly_window(samples: &[RawSample]) -> Vec<HourlyEntry> {
    samples
        .iter()
        .take(HOURLY_WINDOW)
        .map(|sample| HourlyEntry {
            time: sample.timestamp.format("%H:%M").to_string(),
            temperature: truncate_temp(sample.temp),
            icon: IconKey::for_condition(&sample.condition_main),
        })
        .collect()
}

/// Group by UTC calendar date (order of first occurrence), reduce each
/// group to min/max and its midpoint representative, then apply the
/// today-skip and the day limit.
pub fn daily_aggregates(samples: &[RawSample], options: ForecastOptions) -> Vec<DailyAggregate> {
    let mut groups: Vec<(NaiveDate, Vec<&RawSample>)> = Vec::new();
    for sample in samples {
        let date = sample.timestamp.date_naive();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, members)) => members.push(sample),
            None => groups.push((date, vec![sample])),
        }
    }

    let skip = usize::from(!options.include_today);
    groups
        .into_iter()
        .skip(skip)
        .take(options.days)
        .map(|(date, members)| {
            let min_temp = members.iter().map(|s| s.temp_min).fold(f64::INFINITY, f64::min);
            let max_temp = members.iter().map(|s| s.temp_max).fold(f64::NEG_INFINITY, f64::max);
            // The documented selection rule: the group's midpoint element
            // stands in for the whole day's condition.
            let representative = members[members.len() / 2];

            DailyAggregate {
                date,
                min_temp,
                max_temp,
                condition: representative.condition_main.clone(),
                icon: IconKey::for_condition(&representative.condition_main),
            }
        })
        .collect()
}
