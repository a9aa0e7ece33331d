//! Condition-to-asset lookup shared by the normalizer and the favorites
//! aggregator. The provider's `main` condition strings are matched
//! verbatim; anything unknown falls through to the clear-sky assets.

use serde::{Deserialize, Serialize};

/// Full-window background selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKey {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Night,
}

impl BackgroundKey {
    /// A night icon code (the provider marks these with an 'n') always wins
    /// over the condition.
    pub fn for_conditions(condition_main: &str, icon_code: &str) -> Self {
        if icon_code.contains('n') {
            return Self::Night;
        }
        match condition_main {
            "Clouds" | "Mist" | "Fog" => Self::Cloudy,
            "Rain" | "Drizzle" | "Thunderstorm" => Self::Rainy,
            "Snow" => Self::Snowy,
            _ => Self::Sunny,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Night => "night",
        }
    }
}

/// Small condition glyph used in the hourly strip and daily rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKey {
    Sun,
    Cloudy,
    Rain,
    Snow,
}

impl IconKey {
    pub fn for_condition(condition_main: &str) -> Self {
        match condition_main {
            "Clouds" | "Mist" | "Fog" => Self::Cloudy,
            "Rain" | "Drizzle" | "Thunderstorm" => Self::Rain,
            "Snow" => Self::Snow,
            _ => Self::Sun,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }
}
