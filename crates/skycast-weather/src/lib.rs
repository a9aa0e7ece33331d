//! Weather pipeline for SkyCast
//!
//! Fetches forecast series from the provider, reduces them to
//! deterministic view models, and aggregates current conditions across
//! favorite cities with per-city fault tolerance.

pub mod condition;
pub mod dispatch;
pub mod normalize;
pub mod provider;
pub mod snapshots;
pub mod types;

pub use condition::{BackgroundKey, IconKey};
pub use dispatch::LatestOnly;
pub use normalize::{normalize, Forecast, ForecastOptions, HOURLY_WINDOW};
pub use provider::WeatherClient;
pub use snapshots::{FavoritesAggregator, MAX_IN_FLIGHT};
pub use types::*;
