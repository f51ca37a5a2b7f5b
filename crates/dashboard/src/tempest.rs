use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{observations::RawObservation, Credentials};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl Error {
    /// HTTP status reported by the upstream, if it got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(e) => e.status(),
            Error::Status { status, .. } => Some(*status),
        }
    }
}

/// A 24-hour slice of history, in epoch seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub offset: u32,
    pub start: i64,
    pub end: i64,
}

/// Anything that can hand back raw device observations for a time window.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn device_observations(
        &self,
        credentials: &Credentials,
        window: &DayWindow,
    ) -> Result<Vec<RawObservation>, Error>;
}

#[derive(Deserialize)]
struct DeviceObservations {
    #[serde(default)]
    obs: Option<Vec<Value>>,
}

impl DeviceObservations {
    /// Rows that are not arrays are dropped one by one.
    fn into_records(self) -> Vec<RawObservation> {
        self.obs
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_array)
            .map(|row| RawObservation::from(row.as_slice()))
            .collect()
    }
}

/// WeatherFlow REST client.
pub struct TempestClient {
    client: Client,
    base_url: String,
}

impl TempestClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn device_url(&self, device_id: &str) -> String {
        format!("{}/observations/device/{}", self.base_url, device_id)
    }
}

/// Query parameters for one day of device history in imperial units.
pub fn window_query(window: &DayWindow) -> Vec<(&'static str, String)> {
    vec![
        ("time_start", window.start.to_string()),
        ("time_end", window.end.to_string()),
        ("units_temp", String::from("f")),
        ("units_wind", String::from("mph")),
        ("units_pressure", String::from("inhg")),
        ("units_precip", String::from("in")),
        ("units_distance", String::from("mi")),
    ]
}

#[async_trait]
impl ObservationSource for TempestClient {
    async fn device_observations(
        &self,
        credentials: &Credentials,
        window: &DayWindow,
    ) -> Result<Vec<RawObservation>, Error> {
        let url = self.device_url(&credentials.device_id);
        debug!("requesting: {} ({} - {})", url, window.start, window.end);

        let response = self
            .client
            .get(&url)
            .query(&window_query(window))
            .bearer_auth(&credentials.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, message });
        }

        let body: DeviceObservations = response.json().await?;
        Ok(body.into_records())
    }
}
