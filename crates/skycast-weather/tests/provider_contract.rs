//! Provider contract tests using wiremock.
//!
//! These verify the wire mapping (status codes, strict payload fields),
//! the end-to-end normalize pipeline, per-city fault tolerance in batch
//! aggregation, and request cancellation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::{ProviderConfig, WeatherError};
use skycast_weather::{
    normalize, BackgroundKey, FavoritesAggregator, ForecastOptions, Units, WeatherClient,
};

fn test_client(base_url: &str) -> WeatherClient {
    let config = ProviderConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    WeatherClient::new(&config).unwrap()
}

fn sample_entry(dt: i64, temp: f64, condition: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "dt": dt,
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "temp_min": temp - 2.0,
            "temp_max": temp + 2.0,
            "humidity": 50
        },
        "weather": [{"main": condition, "icon": icon}],
        "wind": {"speed": 3.6}
    })
}

/// 3-hour series starting at midnight UTC, `days * 8` entries.
fn forecast_body(days: usize) -> serde_json::Value {
    let start = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap().timestamp();
    let list: Vec<_> = (0..days * 8)
        .map(|i| sample_entry(start + i as i64 * 3 * 3600, 10.0 + i as f64, "Clear", "01d"))
        .collect();

    serde_json::json!({
        "city": {"name": "Istanbul", "country": "TR"},
        "list": list
    })
}

fn current_body(name: &str, temp: f64, condition: &str, icon: &str) -> serde_json::Value {
    let dt = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap().timestamp();
    serde_json::json!({
        "name": name,
        "dt": dt,
        "main": {
            "temp": temp,
            "feels_like": temp,
            "temp_min": temp,
            "temp_max": temp,
            "humidity": 60
        },
        "weather": [{"main": condition, "icon": icon}],
        "wind": {"speed": 1.2}
    })
}

#[tokio::test]
async fn test_forecast_fetch_and_normalize_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Istanbul"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    let forecast = client.fetch_forecast("Istanbul", Units::Metric, &cancel).await.unwrap();

    assert_eq!(forecast.city, "Istanbul, TR");
    assert_eq!(forecast.samples.len(), 24);

    let normalized =
        normalize(&forecast.samples, Units::Metric, ForecastOptions::default()).unwrap();
    assert_eq!(normalized.current.temperature, "10°C");
    assert_eq!(normalized.hourly.len(), 8);
    // Today is skipped by default, leaving the two full following days
    assert_eq!(normalized.daily.len(), 2);
}

#[tokio::test]
async fn test_unknown_city_maps_to_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404", "message": "city not found"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    let err = client.fetch_forecast("Atlantis", Units::Metric, &cancel).await.unwrap_err();

    assert!(matches!(err, WeatherError::CityNotFound(city) if city == "Atlantis"));
}

#[tokio::test]
async fn test_server_error_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    let err = client.fetch_current("Istanbul", Units::Metric, &cancel).await.unwrap_err();

    assert!(matches!(err, WeatherError::Provider(_)));
}

#[tokio::test]
async fn test_missing_required_field_is_provider_error() {
    let server = MockServer::start().await;

    // `main.temp` is absent; strict deserialization must reject this
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Istanbul",
            "dt": 1_700_000_000,
            "main": {"humidity": 60},
            "weather": [{"main": "Clear", "icon": "01d"}],
            "wind": {"speed": 1.0}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    let err = client.fetch_current("Istanbul", Units::Metric, &cancel).await.unwrap_err();

    assert!(matches!(err, WeatherError::Provider(_)));
}

#[tokio::test]
async fn test_empty_weather_array_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Istanbul",
            "dt": 1_700_000_000,
            "main": {
                "temp": 20.0, "feels_like": 19.0,
                "temp_min": 18.0, "temp_max": 22.0, "humidity": 60
            },
            "weather": [],
            "wind": {"speed": 1.0}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    let err = client.fetch_current("Istanbul", Units::Metric, &cancel).await.unwrap_err();

    assert!(matches!(err, WeatherError::Provider(_)));
}

#[tokio::test]
async fn test_failed_city_is_omitted_and_order_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Tokyo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Tokyo", 21.9, "Clear", "01d")),
        )
        .mount(&server)
        .await;

    // "Nowhere" fails with a 404
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Nowhere"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Oslo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("Oslo", -3.7, "Snow", "13n")),
        )
        .mount(&server)
        .await;

    let aggregator = FavoritesAggregator::new(Arc::new(test_client(&server.uri())));
    let cities = vec!["Tokyo".to_string(), "Nowhere".to_string(), "Oslo".to_string()];
    let cancel = CancellationToken::new();
    let snapshots = aggregator.fetch_snapshots(&cities, Units::Metric, &cancel).await;

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].city_name, "Tokyo");
    assert_eq!(snapshots[0].temperature, "21°");
    assert_eq!(snapshots[1].city_name, "Oslo");
    assert_eq!(snapshots[1].temperature, "-3°");
    assert_eq!(snapshots[1].background, BackgroundKey::Night);
}

#[tokio::test]
async fn test_large_batch_completes_under_the_in_flight_cap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_body("City", 10.0, "Clear", "01d")),
        )
        .mount(&server)
        .await;

    let aggregator = FavoritesAggregator::new(Arc::new(test_client(&server.uri())));
    let cities: Vec<String> = (0..12).map(|i| format!("City{}", i)).collect();
    let cancel = CancellationToken::new();
    let snapshots = aggregator.fetch_snapshots(&cities, Units::Metric, &cancel).await;

    assert_eq!(snapshots.len(), 12);
}

#[tokio::test]
async fn test_pre_cancelled_token_short_circuits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(1)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.fetch_forecast("Istanbul", Units::Metric, &cancel).await.unwrap_err();
    assert!(matches!(err, WeatherError::Cancelled));
}

#[tokio::test]
async fn test_superseding_a_slow_request_cancels_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(1))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let dispatcher = skycast_weather::LatestOnly::new();

    let stale_token = dispatcher.begin();
    let stale = tokio::spawn({
        let client = client.clone();
        async move { client.fetch_forecast("Istanbul", Units::Metric, &stale_token).await }
    });

    // A newer request arrives before the slow response does
    tokio::time::sleep(Duration::from_millis(50)).await;
    let _fresh_token = dispatcher.begin();

    let err = stale.await.unwrap().unwrap_err();
    assert!(matches!(err, WeatherError::Cancelled));
}
