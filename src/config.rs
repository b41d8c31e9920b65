use crate::clock::{DEFAULT_CLOCK_FORMAT, DEFAULT_CLOCK_REFRESH_MS};
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "alarm-todo";
const CONFIG_FILE: &str = "config.json";

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Event loop tick in milliseconds
    pub tick_ms: u64,
    /// Clock display refresh interval in milliseconds
    pub clock_refresh_ms: u64,
    /// chrono format string for the clock display
    pub clock_format: String,
    /// Title of every alarm notification
    pub notification_title: String,
    /// Also show fired alarms as desktop notifications
    pub desktop_notifications: bool,
    pub use_emoji: bool,
    pub log_level: String,
    /// Defaults to <data_local_dir>/alarm-todo/logs
    pub log_dir: Option<PathBuf>,
    /// How long status messages stay visible
    pub status_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            clock_refresh_ms: DEFAULT_CLOCK_REFRESH_MS,
            clock_format: DEFAULT_CLOCK_FORMAT.to_string(),
            notification_title: "Alarm!".to_string(),
            desktop_notifications: true,
            use_emoji: true,
            log_level: "info".to_string(),
            log_dir: None,
            status_timeout_secs: 4,
        }
    }
}

impl AppConfig {
    /// Log directory, resolving the platform default when unset
    pub fn resolved_log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_log_dir(),
        }
    }
}

/// ~/.config/alarm-todo/config.json (platform equivalent)
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_log_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base.join(APP_DIR).join("logs"))
}

/// Load config from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        // If file doesn't exist, return default config
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}
