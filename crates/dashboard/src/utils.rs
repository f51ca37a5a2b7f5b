use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use station_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_DASHBOARD_PORT, DEFAULT_HISTORY_DAYS,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_TEMPEST_API_URL,
};
use std::{env, time::Duration};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::StationConfig;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Weather Dashboard - Tempest station history and map API"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $WEATHER_DASHBOARD_CONFIG, ./dashboard.toml,
    /// $XDG_CONFIG_HOME/tempest-dashboard/dashboard.toml, /etc/tempest-dashboard/dashboard.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "WEATHER_DASHBOARD_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "WEATHER_DASHBOARD_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WEATHER_DASHBOARD_PORT")]
    pub port: Option<String>,

    /// Directory containing the front-end bundle
    #[arg(short, long, env = "WEATHER_DASHBOARD_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Tempest device id observations are read from
    #[arg(long, env = "TEMPEST_DEVICE_ID")]
    pub device_id: Option<String>,

    /// Personal access token for the WeatherFlow API
    #[arg(long, env = "TEMPEST_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Station name shown on the dashboard
    #[arg(long, env = "WEATHER_DASHBOARD_STATION_NAME")]
    pub station_name: Option<String>,

    /// Station latitude, used to center the radar map
    #[arg(long, env = "WEATHER_DASHBOARD_LATITUDE", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Station longitude, used to center the radar map
    #[arg(long, env = "WEATHER_DASHBOARD_LONGITUDE", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Base URL of the WeatherFlow REST API
    #[arg(long, env = "TEMPEST_API_URL")]
    pub api_url: Option<String>,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "WEATHER_DASHBOARD_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,

    /// Number of days of history to fetch
    #[arg(long, env = "WEATHER_DASHBOARD_HISTORY_DAYS")]
    pub history_days: Option<u32>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_DASHBOARD_PORT.to_string())
    }

    pub fn static_dir(&self) -> String {
        self.ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string())
    }

    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPEST_API_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn history_days(&self) -> u32 {
        self.history_days.unwrap_or(DEFAULT_HISTORY_DAYS).max(1)
    }

    pub fn station(&self) -> StationConfig {
        StationConfig {
            device_id: self.device_id.clone(),
            access_token: self.access_token.clone(),
            name: self
                .station_name
                .clone()
                .unwrap_or_else(|| "Weather Station".to_string()),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// CLI values win over anything read from the config file
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            domain: self.domain.or(file_config.domain),
            port: self.port.or(file_config.port),
            ui_dir: self.ui_dir.or(file_config.ui_dir),
            device_id: self.device_id.or(file_config.device_id),
            access_token: self.access_token.or(file_config.access_token),
            station_name: self.station_name.or(file_config.station_name),
            latitude: self.latitude.or(file_config.latitude),
            longitude: self.longitude.or(file_config.longitude),
            api_url: self.api_url.or(file_config.api_url),
            request_timeout: self.request_timeout.or(file_config.request_timeout),
            history_days: self.history_days.or(file_config.history_days),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> anyhow::Result<Cli> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("WEATHER_DASHBOARD_CONFIG", "dashboard.toml")
    };

    let file_config: Cli = load_config(&source)
        .map_err(|e| anyhow::anyhow!("error loading config from {}: {}", source, e))?;

    Ok(cli_args.merge(file_config))
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
