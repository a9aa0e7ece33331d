//! HTTP client for the weather provider.
//!
//! The provider resolves free-text city names itself (first match wins).
//! Payloads are deserialized into strictly-typed wire structs: a response
//! missing a required field is a provider error, never a silent null.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use chrono::{DateTime, Utc};

use skycast_core::{ProviderConfig, ReqwestErrorExt, WeatherError};

use crate::types::{CityForecast, CurrentReport, RawSample, Units};

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ReqwestErrorExt::into_weather_error)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full forecast series for a city, earliest sample first.
    pub async fn fetch_forecast(
        &self,
        city: &str,
        units: Units,
        cancel: &CancellationToken,
    ) -> Result<CityForecast, WeatherError> {
        let response: ForecastResponse = self.get_json("forecast", city, units, cancel).await?;

        let samples = response
            .list
            .into_iter()
            .map(|entry| into_sample(entry.dt, entry.main, entry.weather, entry.wind))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CityForecast {
            city: format!("{}, {}", response.city.name, response.city.country),
            samples,
        })
    }

    /// Lighter single-sample variant used for favorite snapshots.
    pub async fn fetch_current(
        &self,
        city: &str,
        units: Units,
        cancel: &CancellationToken,
    ) -> Result<CurrentReport, WeatherError> {
        let response: CurrentResponse = self.get_json("weather", city, units, cancel).await?;

        let sample = into_sample(response.dt, response.main, response.weather, response.wind)?;
        Ok(CurrentReport {
            city: response.name,
            sample,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        units: Units,
        cancel: &CancellationToken,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request = self.http.get(&url).query(&[
            ("q", city),
            ("units", units.as_query()),
            ("appid", self.api_key.as_str()),
        ]);

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
            result = request.send() => result.map_err(ReqwestErrorExt::into_weather_error)?,
        };

        match response.status() {
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            status if !status.is_success() => {
                return Err(WeatherError::Provider(format!("provider returned status {}", status)));
            }
            _ => {}
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(WeatherError::Cancelled),
            result = response.json::<T>() => result.map_err(ReqwestErrorExt::into_weather_error),
        }
    }
}

fn into_sample(
    dt: i64,
    main: MainFields,
    weather: Vec<WeatherFields>,
    wind: WindFields,
) -> Result<RawSample, WeatherError> {
    let timestamp = DateTime::<Utc>::from_timestamp(dt, 0)
        .ok_or_else(|| WeatherError::Provider(format!("invalid sample timestamp {}", dt)))?;

    let condition = weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Provider("sample has no weather element".to_string()))?;

    Ok(RawSample {
        timestamp,
        temp: main.temp,
        feels_like: main.feels_like,
        temp_min: main.temp_min,
        temp_max: main.temp_max,
        humidity: main.humidity,
        wind_speed: wind.speed,
        condition_main: condition.main,
        icon_code: condition.icon,
    })
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: CityFields,
    list: Vec<SampleEntry>,
}

#[derive(Debug, Deserialize)]
struct CityFields {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct SampleEntry {
    dt: i64,
    main: MainFields,
    weather: Vec<WeatherFields>,
    wind: WindFields,
}

#[derive(Debug, Deserialize)]
struct MainFields {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WeatherFields {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindFields {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    dt: i64,
    main: MainFields,
    weather: Vec<WeatherFields>,
    wind: WindFields,
}
