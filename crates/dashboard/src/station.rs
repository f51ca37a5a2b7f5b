use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::historical::Error;

/// Everything the dashboard knows about the station it serves.
///
/// Credentials stay optional here; they are checked on every request that
/// needs them, so a misconfigured server still starts and reports the problem.
#[derive(Clone, Debug, Default)]
pub struct StationConfig {
    pub device_id: Option<String>,
    pub access_token: Option<String>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Validated credentials for the WeatherFlow API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub device_id: String,
    pub access_token: String,
}

/// Public station details used by the map component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationInfo {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StationConfig {
    pub fn credentials(&self) -> Result<Credentials, Error> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        match (present(&self.device_id), present(&self.access_token)) {
            (Some(device_id), Some(access_token)) => Ok(Credentials {
                device_id,
                access_token,
            }),
            (device_id, access_token) => {
                let mut missing = vec![];
                if device_id.is_none() {
                    missing.push("device_id");
                }
                if access_token.is_none() {
                    missing.push("access_token");
                }
                Err(Error::MissingConfiguration(format!(
                    "Required settings not provided: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    pub fn info(&self) -> StationInfo {
        StationInfo {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
