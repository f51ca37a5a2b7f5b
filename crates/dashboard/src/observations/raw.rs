use serde::Deserialize;
use serde_json::Value;
use time::{Date, OffsetDateTime};

/// Positions inside a Tempest `obs` array.
const TIMESTAMP_IDX: usize = 0;
const TEMPERATURE_IDX: usize = 7;
const HUMIDITY_IDX: usize = 8;
const DAILY_RAIN_IDX: usize = 11;

/// A single instantaneous sensor reading, decoded from the positional array the
/// WeatherFlow API returns.
///
/// Absent positions, `null`s and non-numeric entries all decode to `None`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Value>")]
pub struct RawObservation {
    /// Epoch seconds
    pub timestamp: Option<f64>,
    /// Air temperature, °F
    pub temperature: Option<f64>,
    /// Relative humidity, %
    pub humidity: Option<f64>,
    /// Rain accumulated so far on this calendar day, inches
    pub daily_rain: Option<f64>,
}

impl RawObservation {
    /// Timestamp, only if it is a finite number.
    pub fn valid_timestamp(&self) -> Option<f64> {
        self.timestamp.filter(|ts| ts.is_finite())
    }

    /// UTC calendar date this reading falls on, if the timestamp is usable.
    pub fn date(&self) -> Option<Date> {
        self.valid_timestamp().and_then(utc_date)
    }
}

impl From<Vec<Value>> for RawObservation {
    fn from(values: Vec<Value>) -> Self {
        RawObservation::from(values.as_slice())
    }
}

impl From<&[Value]> for RawObservation {
    fn from(values: &[Value]) -> Self {
        let field = |idx: usize| values.get(idx).and_then(Value::as_f64);
        RawObservation {
            timestamp: field(TIMESTAMP_IDX),
            temperature: field(TEMPERATURE_IDX),
            humidity: field(HUMIDITY_IDX),
            daily_rain: field(DAILY_RAIN_IDX),
        }
    }
}

/// UTC date for an epoch-seconds timestamp; `None` when out of range.
pub fn utc_date(timestamp: f64) -> Option<Date> {
    if !timestamp.is_finite() {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(timestamp.floor() as i64)
        .ok()
        .map(|dt| dt.date())
}
