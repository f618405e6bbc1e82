//! Runtime configuration loaded from a TOML file with sane defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::scrapers::SourceConfig;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taikai.toml";

/// One rate-limit policy: at most `max_requests` per `window_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_secs: 60,
        }
    }
}

/// Service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Network timeout for listing fetches, in seconds.
    pub request_timeout_secs: u64,
    /// Politeness delay between ingestion store writes, in milliseconds.
    pub politeness_delay_ms: u64,
    /// Coarse gate applied to every API request.
    pub global_rate_limit: RateLimitSettings,
    /// Stricter gate applied per tournament-API request.
    pub api_rate_limit: RateLimitSettings,
    /// Listing sources to scrape.
    pub sources: Vec<SourceConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            politeness_delay_ms: 1000,
            global_rate_limit: RateLimitSettings {
                max_requests: 100,
                window_secs: 15 * 60,
            },
            api_rate_limit: RateLimitSettings::default(),
            sources: vec![SourceConfig::default()],
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    /// Source by id, or the first configured source when no id is given.
    pub fn source(&self, id: Option<&str>) -> Option<&SourceConfig> {
        match id {
            Some(id) => self.sources.iter().find(|s| s.id == id),
            None => self.sources.first(),
        }
    }
}

/// Load settings from an explicit path, or from `taikai.toml` in the
/// working directory when present, or defaults otherwise.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(Settings::default());
            }
            default.to_path_buf()
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let settings = toml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(settings)
}
