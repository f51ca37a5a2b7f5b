//! Tempest Dashboard Core Library
//!
//! Shared pieces for the dashboard service:
//! - Configuration file discovery and loading (XDG-compliant)
//! - Common defaults

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

/// Application name used for XDG paths
pub const APP_NAME: &str = "tempest-dashboard";

/// Default dashboard port
pub const DEFAULT_DASHBOARD_PORT: u16 = 9810;

/// Default base URL of the WeatherFlow REST API
pub const DEFAULT_TEMPEST_API_URL: &str = "https://swd.weatherflow.com/swd/rest";

/// Default timeout for a single upstream request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// Default number of day-offsets fetched for the history chart
pub const DEFAULT_HISTORY_DAYS: u32 = 5;
