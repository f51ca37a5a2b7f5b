use crate::helpers::{configured_station, get, reading_in, spawn_app, MockTempestApi};
use axum::http::StatusCode;
use dashboard::{tempest, ErrorBody, HistoricalResponse, RawObservation, StationConfig};
use serde_json::from_slice;
use std::sync::Arc;

fn unavailable() -> tempest::Error {
    tempest::Error::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        message: String::from("maintenance"),
    }
}

/// Every day succeeds, so every day shows up once, oldest first
#[tokio::test]
async fn historical_returns_one_reading_per_day() {
    let mut tempest_api = MockTempestApi::new();
    tempest_api
        .expect_device_observations()
        .withf(|credentials, _| {
            credentials.device_id == "4242" && credentials.access_token == "test-token"
        })
        .times(5)
        .returning(|_, window| {
            Ok(vec![
                reading_in(window, 60.0 + window.offset as f64, 50.0, 0.1),
                reading_in(window, 60.0 + window.offset as f64, 50.0, 0.3),
            ])
        });

    let test_app = spawn_app(Arc::new(tempest_api), configured_station()).await;
    let (status, body) = get(&test_app, "/api/historical").await;

    assert_eq!(status, StatusCode::OK);
    let response: HistoricalResponse = from_slice(&body).unwrap();

    assert_eq!(response.obs.len(), 5);
    assert!(response
        .obs
        .windows(2)
        .all(|w| w[0].timestamp < w[1].timestamp));
    // oldest day is offset 4
    assert_eq!(response.obs[0].temperature, 64.0);
    assert_eq!(response.obs[4].temperature, 60.0);
    assert!(response.obs.iter().all(|o| o.rain == 0.3));

    assert_eq!(response.summary.total_observations, 10);
    assert_eq!(
        response.summary.end_time - response.summary.start_time,
        5 * 24 * 60 * 60
    );
}

/// A failing day is skipped and the rest still render
#[tokio::test]
async fn historical_tolerates_failed_days() {
    let mut tempest_api = MockTempestApi::new();
    tempest_api
        .expect_device_observations()
        .times(5)
        .returning(|_, window| {
            if window.offset == 2 {
                Err(unavailable())
            } else {
                Ok(vec![reading_in(window, 70.0, 55.0, 0.0)])
            }
        });

    let test_app = spawn_app(Arc::new(tempest_api), configured_station()).await;
    let (status, body) = get(&test_app, "/api/historical").await;

    assert_eq!(status, StatusCode::OK);
    let response: HistoricalResponse = from_slice(&body).unwrap();
    assert_eq!(response.obs.len(), 4);
    assert_eq!(response.summary.total_observations, 4);
}

#[tokio::test]
async fn historical_without_credentials_is_server_error() {
    let mut tempest_api = MockTempestApi::new();
    tempest_api.expect_device_observations().times(0);

    let station = StationConfig {
        access_token: None,
        ..configured_station()
    };
    let test_app = spawn_app(Arc::new(tempest_api), station).await;
    let (status, body) = get(&test_app, "/api/historical").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "Missing configuration");
    assert!(error.details.contains("access_token"));
}

#[tokio::test]
async fn historical_with_no_data_is_not_found() {
    let mut tempest_api = MockTempestApi::new();
    tempest_api
        .expect_device_observations()
        .times(5)
        .returning(|_, window| {
            if window.offset % 2 == 0 {
                Err(unavailable())
            } else {
                Ok(vec![])
            }
        });

    let test_app = spawn_app(Arc::new(tempest_api), configured_station()).await;
    let (status, body) = get(&test_app, "/api/historical").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "No weather data available");
    for day in 0..5 {
        assert!(error.details.contains(&format!("Day {}:", day)));
    }
    assert!(error.details.contains("maintenance"));
    assert!(error.details.contains("no observations returned"));
}

#[tokio::test]
async fn historical_with_unusable_data_is_not_found() {
    let mut tempest_api = MockTempestApi::new();
    tempest_api
        .expect_device_observations()
        .times(5)
        .returning(|_, window| {
            Ok(vec![RawObservation {
                timestamp: Some((window.end - 3600) as f64),
                temperature: None,
                humidity: Some(50.0),
                daily_rain: Some(0.2),
            }])
        });

    let test_app = spawn_app(Arc::new(tempest_api), configured_station()).await;
    let (status, body) = get(&test_app, "/api/historical").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorBody = from_slice(&body).unwrap();
    assert_eq!(error.error, "No valid weather data available");
    assert_eq!(
        error.details,
        "Could not process any observations from the available data"
    );
}
