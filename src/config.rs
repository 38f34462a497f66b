use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_LOCATION: &str = "Springfield";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Mock,
    OpenMeteo,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "open-meteo" | "openmeteo" => Ok(ProviderKind::OpenMeteo),
            other => Err(format!("unknown weather provider '{other}' (mock, open-meteo)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub provider: ProviderKind,
    pub delay: Duration,
    pub refresh: Duration,
    pub base_temp: i32,
    pub mock_fail: bool,
    pub location: String,
    pub timeout: Duration,
    pub geocode_url: String,
    pub forecast_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub weather: WeatherConfig,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let weather = WeatherConfig {
            provider: try_load(&lookup, "TRANSITD_WEATHER_PROVIDER", ProviderKind::Mock),
            delay: Duration::from_millis(try_load(&lookup, "TRANSITD_WEATHER_DELAY_MS", 1500)),
            refresh: Duration::from_secs(
                try_load::<u64, _>(&lookup, "TRANSITD_WEATHER_REFRESH_SECS", 30 * 60).max(1),
            ),
            base_temp: try_load(&lookup, "TRANSITD_WEATHER_BASE_TEMP", 65),
            mock_fail: try_load(&lookup, "TRANSITD_WEATHER_MOCK_FAIL", false),
            location: try_load(
                &lookup,
                "TRANSITD_WEATHER_LOCATION",
                DEFAULT_LOCATION.to_string(),
            ),
            timeout: Duration::from_millis(try_load(&lookup, "TRANSITD_WEATHER_TIMEOUT_MS", 5000)),
            geocode_url: try_load(
                &lookup,
                "TRANSITD_WEATHER_GEOCODE_URL",
                "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            ),
            forecast_url: try_load(
                &lookup,
                "TRANSITD_WEATHER_FORECAST_URL",
                "https://api.open-meteo.com/v1/forecast".to_string(),
            ),
        };
        Self { weather }
    }
}

/// Unset or unparseable values fall back to `default` with a log line.
fn try_load<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(e) => {
            warn!("Invalid {key} value '{raw}': {e}; using default: {default:?}");
            default
        }
    }
}
