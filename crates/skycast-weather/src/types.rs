use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::{BackgroundKey, IconKey};

/// Unit system requested from the provider. The provider converts; this
/// core only selects the system and the matching display suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_metric_flag(is_metric: bool) -> Self {
        if is_metric {
            Self::Metric
        } else {
            Self::Imperial
        }
    }

    /// Value of the provider's `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temp_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "km/h",
            Self::Imperial => "mph",
        }
    }
}

/// One timestamped reading from the provider's forecast series
/// (3-hour resolution for the forecast endpoint, a single reading for the
/// current-conditions endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: DateTime<Utc>,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition_main: String,
    pub icon_code: String,
}

/// Forecast series for one city, with the provider-canonical city label
/// ("Name, CC").
#[derive(Debug, Clone)]
pub struct CityForecast {
    pub city: String,
    pub samples: Vec<RawSample>,
}

/// Single current-conditions reading with the provider-canonical city name.
#[derive(Debug, Clone)]
pub struct CurrentReport {
    pub city: String,
    pub sample: RawSample,
}

/// Display projection of the newest sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// e.g. "21°C"
    pub temperature: String,
    /// e.g. "19°"
    pub feels_like: String,
    /// e.g. "45%"
    pub humidity: String,
    /// e.g. "3.6 km/h"
    pub wind_speed: String,
    pub condition: String,
    pub icon: IconKey,
    pub background: BackgroundKey,
}

/// One slot of the hourly strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// e.g. "15:00"
    pub time: String,
    /// e.g. "21°"
    pub temperature: String,
    pub icon: IconKey,
}

/// Reduced summary for one calendar date (UTC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub condition: String,
    pub icon: IconKey,
}

impl DailyAggregate {
    /// Short weekday label, e.g. "Mon"
    pub fn day_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn min_display(&self) -> String {
        truncate_temp(self.min_temp)
    }

    pub fn max_display(&self) -> String {
        truncate_temp(self.max_temp)
    }
}

/// Quick-glance conditions for one favorite city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteSnapshot {
    pub city_name: String,
    /// e.g. "21°"
    pub temperature: String,
    pub condition: String,
    pub background: BackgroundKey,
}

/// Integer-cast display rounding: truncation toward zero, not half-up.
pub fn truncate_temp(value: f64) -> String {
    format!("{}°", value as i64)
}
