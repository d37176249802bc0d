use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub collector: CollectorConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub interval_ms: u64,
    pub pretty: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            interval_ms: 500,
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub status_poll_attempts: u32,
    pub status_poll_interval_ms: u64,
    /// Fail with a timeout instead of keeping the last status when the
    /// process never reads `running` within the poll budget.
    pub require_running: bool,
    /// Endpoint the UDP socket is pointed at to discover the outbound address.
    /// Nothing is sent to it.
    pub route_probe: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            status_poll_attempts: 100,
            status_poll_interval_ms: 10,
            require_running: false,
            route_probe: "8.8.8.8:80".to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_millis(self.status_poll_interval_ms)
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("procwatch").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}
