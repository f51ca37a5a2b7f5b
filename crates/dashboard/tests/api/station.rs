use crate::helpers::{configured_station, get, spawn_app, MockTempestApi};
use axum::http::StatusCode;
use dashboard::StationInfo;
use serde_json::from_slice;
use std::sync::Arc;

#[tokio::test]
async fn station_info_is_served_without_credentials() {
    let test_app = spawn_app(Arc::new(MockTempestApi::new()), configured_station()).await;
    let (status, body) = get(&test_app, "/api/station").await;

    assert_eq!(status, StatusCode::OK);
    let raw = String::from_utf8(body.clone()).unwrap();
    assert!(!raw.contains("test-token"));

    let info: StationInfo = from_slice(&body).unwrap();
    assert_eq!(info.name, "Backyard Tempest");
    assert_eq!(info.latitude, Some(41.8781));
    assert_eq!(info.longitude, Some(-87.6298));
}

#[tokio::test]
async fn unknown_paths_fall_through_to_static_files() {
    let test_app = spawn_app(Arc::new(MockTempestApi::new()), configured_station()).await;
    let (status, _) = get(&test_app, "/missing.js").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
