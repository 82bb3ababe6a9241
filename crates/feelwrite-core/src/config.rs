//! Application configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/feelwrite/feelwrite.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Missing keys in an override fall back to the embedded defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/feelwrite.toml");

/// Upper bound on `insights.window_days` (ten years)
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Settings for weekly insight generation
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Length of the trailing window in days
    pub window_days: i64,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on the single generation attempt
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            temperature: 0.7,
            max_tokens: 500,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for the supportive companion chat
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 100,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub insights: InsightConfig,
    pub companion: CompanionConfig,
}

impl AppConfig {
    /// Load from the default override location, or embedded defaults
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => parse_config(DEFAULT_CONFIG),
        }
    }

    /// Load from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::InvalidData(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        parse_config(&content)
    }
}

/// Get the default override config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("feelwrite").join("feelwrite.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    insights: Option<RawInsights>,
    companion: Option<RawCompanion>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInsights {
    window_days: Option<i64>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCompanion {
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = AppConfig::default();

    if let Some(insights) = raw.insights {
        if let Some(days) = insights.window_days {
            if !(1..=MAX_WINDOW_DAYS).contains(&days) {
                return Err(Error::InvalidData(format!(
                    "insights.window_days must be between 1 and {}, got {}",
                    MAX_WINDOW_DAYS, days
                )));
            }
            config.insights.window_days = days;
        }
        if let Some(t) = insights.temperature {
            config.insights.temperature = t;
        }
        if let Some(m) = insights.max_tokens {
            config.insights.max_tokens = m;
        }
        if let Some(secs) = insights.timeout_secs {
            config.insights.timeout = Duration::from_secs(secs);
        }
    }

    if let Some(companion) = raw.companion {
        if let Some(t) = companion.temperature {
            config.companion.temperature = t;
        }
        if let Some(m) = companion.max_tokens {
            config.companion.max_tokens = m;
        }
        if let Some(secs) = companion.timeout_secs {
            config.companion.timeout = Duration::from_secs(secs);
        }
    }

    Ok(config)
}
