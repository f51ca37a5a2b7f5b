use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use dashboard::{
    app, tempest, AppState, Credentials, DayWindow, ObservationSource, RawObservation,
    StationConfig,
};
use hyper::{header, Method};
use mockall::mock;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub TempestApi {}

    #[async_trait]
    impl ObservationSource for TempestApi {
        async fn device_observations(
            &self,
            credentials: &Credentials,
            window: &DayWindow,
        ) -> Result<Vec<RawObservation>, tempest::Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn configured_station() -> StationConfig {
    StationConfig {
        device_id: Some(String::from("4242")),
        access_token: Some(String::from("test-token")),
        name: String::from("Backyard Tempest"),
        latitude: Some(41.8781),
        longitude: Some(-87.6298),
    }
}

pub async fn spawn_app(source: Arc<dyn ObservationSource>, station: StationConfig) -> TestApp {
    let state = AppState {
        static_dir: String::from("./does-not-exist"),
        station,
        history_days: 5,
        source,
    };

    TestApp { app: app(state) }
}

/// Sends a GET to `uri` and returns the status with the raw body.
pub async fn get(test_app: &TestApp, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// A complete reading an hour before the end of `window`.
pub fn reading_in(window: &DayWindow, temperature: f64, humidity: f64, rain: f64) -> RawObservation {
    RawObservation {
        timestamp: Some((window.end - 3600) as f64),
        temperature: Some(temperature),
        humidity: Some(humidity),
        daily_rain: Some(rain),
    }
}
