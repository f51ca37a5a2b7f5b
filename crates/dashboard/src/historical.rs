use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{
    observations::{reduce_to_daily, RawObservation, WeatherObservation},
    tempest::{self, DayWindow, ObservationSource},
    Credentials, StationConfig,
};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("No weather data available: {0}")]
    NoData(String),
    #[error("No valid weather data available")]
    NoValidObservations,
    #[error("Failed to fetch historical data: {message}")]
    Upstream {
        status: Option<StatusCode>,
        message: String,
    },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<tempest::Error> for Error {
    fn from(e: tempest::Error) -> Self {
        Error::Upstream {
            status: e.status(),
            message: e.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingConfiguration(_) | Error::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::NoData(_) | Error::NoValidObservations => StatusCode::NOT_FOUND,
            Error::Upstream { status, .. } => {
                status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            Error::MissingConfiguration(details) => ("Missing configuration", details.clone()),
            Error::NoData(details) => ("No weather data available", details.clone()),
            Error::NoValidObservations => (
                "No valid weather data available",
                String::from("Could not process any observations from the available data"),
            ),
            Error::Upstream { message, .. } => ("Failed to fetch historical data", message.clone()),
            Error::Unexpected(details) => ("An unexpected error occurred", details.clone()),
        };
        ErrorBody {
            error: error.to_owned(),
            details,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("historical request failed: {}", self);
        } else {
            warn!("historical request failed: {}", self);
        }
        (status, Json(self.body())).into_response()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    /// Start of the fetched window, epoch seconds
    pub start_time: i64,
    /// End of the fetched window, epoch seconds
    pub end_time: i64,
    /// Raw readings received across all days
    pub total_observations: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoricalResponse {
    pub obs: Vec<WeatherObservation>,
    pub summary: Summary,
}

/// Raw readings gathered by [`fetch_history`], plus the reason for every day
/// that contributed nothing.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<RawObservation>,
    pub failures: Vec<String>,
}

/// 24-hour windows ending at `now`, newest first. Offset 0 is the last day.
pub fn day_windows(now: OffsetDateTime, days: u32) -> Vec<DayWindow> {
    let now = now.unix_timestamp();
    (0..days)
        .map(|offset| {
            let end = now - i64::from(offset) * SECONDS_PER_DAY;
            DayWindow {
                offset,
                start: end - SECONDS_PER_DAY,
                end,
            }
        })
        .collect()
}

/// Requests each window in turn. A failing or empty day is logged and skipped;
/// it never stops the remaining days from being fetched.
pub async fn fetch_history(
    source: &dyn ObservationSource,
    credentials: &Credentials,
    windows: &[DayWindow],
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();

    for window in windows {
        match source.device_observations(credentials, window).await {
            Ok(records) if records.is_empty() => {
                warn!("no observations returned for day {}", window.offset);
                outcome
                    .failures
                    .push(format!("Day {}: no observations returned", window.offset));
            }
            Ok(mut records) => {
                info!(
                    "fetched {} observations for day {}",
                    records.len(),
                    window.offset
                );
                outcome.records.append(&mut records);
            }
            Err(e) => {
                warn!("error fetching day {}: {}", window.offset, e);
                outcome.failures.push(format!("Day {}: {}", window.offset, e));
            }
        }
    }

    outcome
}

/// Fetches up to `days` of history and reduces it to one reading per day.
pub async fn historical_observations(
    source: &dyn ObservationSource,
    station: &StationConfig,
    now: OffsetDateTime,
    days: u32,
) -> Result<HistoricalResponse, Error> {
    let credentials = station.credentials()?;
    let windows = day_windows(now, days);

    let outcome = fetch_history(source, &credentials, &windows).await;
    if outcome.records.is_empty() {
        return Err(Error::NoData(outcome.failures.join("; ")));
    }

    let obs = reduce_to_daily(&outcome.records);
    if obs.is_empty() {
        return Err(Error::NoValidObservations);
    }

    let start_time = windows.last().map(|w| w.start).unwrap_or_default();
    let end_time = windows.first().map(|w| w.end).unwrap_or_default();

    Ok(HistoricalResponse {
        obs,
        summary: Summary {
            start_time,
            end_time,
            total_observations: outcome.records.len(),
        },
    })
}
