use crate::config::Config;
use crate::views::MountedView;
use crate::weather::{build_provider, WeatherProvider, WeatherWidget};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the UI has mounted, keyed by the handle returned at mount time.
pub struct AppState {
    pub config: Config,
    pub weather_provider: Arc<dyn WeatherProvider>,
    pub views: HashMap<String, MountedView>,
    pub widgets: HashMap<String, WeatherWidget>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let weather_provider = build_provider(&config.weather);
        Self {
            config,
            weather_provider,
            views: HashMap::new(),
            widgets: HashMap::new(),
        }
    }
}
