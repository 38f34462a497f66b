use crate::config::{ProviderKind, WeatherConfig};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Condition shown when a fetch fails.
pub const UNAVAILABLE_CONDITION: &str = "Weather unavailable";

const MOCK_CONDITIONS: &[&str] = &[
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Light Rain",
    "Rain",
    "Thunderstorm",
    "Snow",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Sun,
    CloudSun,
    Cloud,
    CloudDrizzle,
    CloudRain,
    CloudLightning,
    CloudSnow,
}

impl WeatherIcon {
    pub fn for_condition(condition: &str) -> Self {
        let c = condition.to_ascii_lowercase();
        if c.contains("thunder") || c.contains("lightning") {
            WeatherIcon::CloudLightning
        } else if c.contains("snow") || c.contains("sleet") {
            WeatherIcon::CloudSnow
        } else if c.contains("drizzle") || c.contains("light rain") {
            WeatherIcon::CloudDrizzle
        } else if c.contains("rain") || c.contains("shower") {
            WeatherIcon::CloudRain
        } else if c.contains("partly") {
            WeatherIcon::CloudSun
        } else if c.contains("sun") || c.contains("clear") {
            WeatherIcon::Sun
        } else {
            WeatherIcon::Cloud
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub condition: String,
    pub temperature: i32,
    pub icon: WeatherIcon,
    pub location: String,
    pub feels_like: i32,
    pub humidity: u32,
    pub wind_speed: u32,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("simulated weather outage")]
    Simulated,
    #[error("location not found: {0}")]
    UnknownLocation(String),
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Location used when a widget is mounted without one.
    fn default_location(&self) -> &str;

    /// Blocking; called from a widget's worker thread.
    fn fetch(&self, location: Option<&str>) -> Result<WeatherReading, WeatherError>;
}

pub fn build_provider(config: &WeatherConfig) -> Arc<dyn WeatherProvider> {
    match config.provider {
        ProviderKind::Mock => Arc::new(MockWeatherProvider {
            delay: config.delay,
            base_temp: config.base_temp,
            fail: config.mock_fail,
            default_location: config.location.clone(),
        }),
        ProviderKind::OpenMeteo => Arc::new(OpenMeteoProvider::new(config)),
    }
}

fn pick_location<'a>(requested: Option<&'a str>, fallback: &'a str) -> &'a str {
    requested
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone)]
pub struct MockWeatherProvider {
    pub delay: Duration,
    pub base_temp: i32,
    pub fail: bool,
    pub default_location: String,
}

/// Random but self-consistent reading: the icon follows the condition and
/// feels-like stays within two degrees of the temperature.
pub fn mock_reading<R: Rng>(rng: &mut R, base_temp: i32, location: &str) -> WeatherReading {
    let condition = MOCK_CONDITIONS.choose(rng).copied().unwrap_or("Sunny");
    let temperature = base_temp + rng.gen_range(-10..=10);
    WeatherReading {
        condition: condition.to_string(),
        temperature,
        icon: WeatherIcon::for_condition(condition),
        location: location.to_string(),
        feels_like: temperature + rng.gen_range(-2..=2),
        humidity: rng.gen_range(40..80),
        wind_speed: rng.gen_range(0..15),
    }
}

impl WeatherProvider for MockWeatherProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_location(&self) -> &str {
        &self.default_location
    }

    fn fetch(&self, location: Option<&str>) -> Result<WeatherReading, WeatherError> {
        thread::sleep(self.delay);
        if self.fail {
            return Err(WeatherError::Simulated);
        }
        let location = pick_location(location, &self.default_location);
        Ok(mock_reading(&mut rand::thread_rng(), self.base_temp, location))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: u16,
}

/// Open-Meteo: geocode the location name, then read current conditions in
/// Fahrenheit and mph.
pub struct OpenMeteoProvider {
    agent: ureq::Agent,
    default_location: String,
    geocode_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &WeatherConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.timeout)
            .timeout_read(config.timeout)
            .timeout_write(config.timeout)
            .user_agent(concat!("transitd/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            default_location: config.location.clone(),
            geocode_url: config.geocode_url.clone(),
            forecast_url: config.forecast_url.clone(),
        }
    }

    fn geocode(&self, name: &str) -> anyhow::Result<Option<GeocodeHit>> {
        let body: GeocodeResponse = self
            .agent
            .get(&self.geocode_url)
            .query("name", name)
            .query("count", "1")
            .call()
            .map_err(|e| anyhow!("geocoding {name}: {}", describe_ureq_error(e)))?
            .into_json()
            .context("decoding geocoding response")?;
        Ok(body.results.into_iter().next())
    }

    fn current(&self, hit: &GeocodeHit) -> anyhow::Result<CurrentConditions> {
        let body: ForecastResponse = self
            .agent
            .get(&self.forecast_url)
            .query("latitude", &hit.latitude.to_string())
            .query("longitude", &hit.longitude.to_string())
            .query(
                "current",
                "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code",
            )
            .query("temperature_unit", "fahrenheit")
            .query("wind_speed_unit", "mph")
            .call()
            .map_err(|e| anyhow!("forecast for {}: {}", hit.name, describe_ureq_error(e)))?
            .into_json()
            .context("decoding forecast response")?;
        Ok(body.current)
    }
}

impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    fn default_location(&self) -> &str {
        &self.default_location
    }

    fn fetch(&self, location: Option<&str>) -> Result<WeatherReading, WeatherError> {
        let name = pick_location(location, &self.default_location);
        let hit = self
            .geocode(name)?
            .ok_or_else(|| WeatherError::UnknownLocation(name.to_string()))?;
        let current = self.current(&hit)?;
        let condition = wmo_condition(current.weather_code);
        Ok(WeatherReading {
            condition: condition.to_string(),
            temperature: current.temperature_2m.round() as i32,
            icon: WeatherIcon::for_condition(condition),
            location: hit.name,
            feels_like: current.apparent_temperature.round() as i32,
            humidity: current.relative_humidity_2m.round().max(0.0) as u32,
            wind_speed: current.wind_speed_10m.round().max(0.0) as u32,
        })
    }
}

fn describe_ureq_error(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(status, _) => format!("http status {status}"),
        ureq::Error::Transport(transport) => format!("transport: {transport}"),
    }
}

/// WMO weather interpretation codes as used by Open-Meteo.
fn wmo_condition(code: u16) -> &'static str {
    match code {
        0 => "Clear",
        1 | 2 => "Partly Cloudy",
        3 => "Cloudy",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61 | 80 => "Light Rain",
        63..=67 | 81 | 82 => "Rain",
        71..=77 | 85 | 86 => "Snow",
        95..=99 => "Thunderstorm",
        _ => "Cloudy",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WeatherState {
    Loading,
    Ready(WeatherReading),
    Unavailable {
        condition: String,
        icon: WeatherIcon,
        location: String,
    },
}

impl WeatherState {
    fn unavailable(location: &str) -> Self {
        WeatherState::Unavailable {
            condition: UNAVAILABLE_CONDITION.to_string(),
            icon: WeatherIcon::Cloud,
            location: location.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub weather: WeatherState,
    pub updated_at: Option<DateTime<Utc>>,
    pub fetch_count: u32,
}

/// A mounted weather widget. One worker thread fetches on mount and then
/// once per refresh interval; the next fetch cannot start until the previous
/// one has returned. Dropping the widget stops the timer.
pub struct WeatherWidget {
    shared: Arc<Mutex<WeatherSnapshot>>,
    location: Option<String>,
    _cancel: mpsc::Sender<()>,
}

impl WeatherWidget {
    pub fn mount(
        provider: Arc<dyn WeatherProvider>,
        location: Option<String>,
        refresh: Duration,
    ) -> anyhow::Result<Self> {
        let shared = Arc::new(Mutex::new(WeatherSnapshot {
            weather: WeatherState::Loading,
            updated_at: None,
            fetch_count: 0,
        }));
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let worker_shared = Arc::clone(&shared);
        let worker_location = location.clone();
        info!(provider = provider.name(), ?location, ?refresh, "mounting weather widget");
        thread::Builder::new()
            .name("weather-refresh".to_string())
            .spawn(move || {
                refresh_loop(
                    provider.as_ref(),
                    worker_location.as_deref(),
                    refresh,
                    &worker_shared,
                    &cancel_rx,
                )
            })
            .context("spawning weather refresh worker")?;
        Ok(Self {
            shared,
            location,
            _cancel: cancel_tx,
        })
    }

    pub fn snapshot(&self) -> WeatherSnapshot {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for WeatherWidget {
    fn drop(&mut self) {
        debug!(location = ?self.location, "weather widget unmounted");
    }
}

fn refresh_loop(
    provider: &dyn WeatherProvider,
    location: Option<&str>,
    refresh: Duration,
    shared: &Mutex<WeatherSnapshot>,
    cancel: &mpsc::Receiver<()>,
) {
    loop {
        let outcome = provider.fetch(location);
        match cancel.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => {
                debug!("weather widget gone before fetch returned; dropping result");
                return;
            }
        }

        let next = match outcome {
            Ok(reading) => {
                debug!(
                    condition = %reading.condition,
                    temperature = reading.temperature,
                    "weather ready"
                );
                WeatherState::Ready(reading)
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "weather fetch failed");
                WeatherState::unavailable(pick_location(location, provider.default_location()))
            }
        };
        {
            let mut snap = shared.lock().unwrap_or_else(PoisonError::into_inner);
            snap.weather = next;
            snap.updated_at = Some(Utc::now());
            snap.fetch_count += 1;
        }

        match cancel.recv_timeout(refresh) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
