pub mod historical;
pub mod observations;
pub mod routes;
mod startup;
pub mod station;
pub mod tempest;
mod utils;

pub use historical::{ErrorBody, HistoricalResponse, Summary};
pub use observations::{RawObservation, WeatherObservation};
pub use startup::*;
pub use station::{Credentials, StationConfig, StationInfo};
pub use tempest::{DayWindow, ObservationSource, TempestClient};
pub use utils::*;
