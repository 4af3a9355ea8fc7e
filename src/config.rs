use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::error::{Error, Result};
use crate::trends::ForecastMethod;

/// Per-operation defaults. Explicit command-line flags always win over these.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub trends: TrendConfig,
    #[serde(default)]
    pub seasonality: SeasonalityConfig,
    #[serde(default)]
    pub outliers: OutlierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_periods")]
    pub periods: usize,
    #[serde(default = "default_method")]
    pub method: ForecastMethod,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_window")]
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityConfig {
    #[serde(default = "default_period")]
    pub period: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_periods() -> usize { 7 }
fn default_method() -> ForecastMethod { ForecastMethod::Sma }
fn default_window() -> usize { 7 }
fn default_alpha() -> f64 { 0.3 }
fn default_period() -> usize { 7 } // weekly
fn default_threshold() -> f64 { 2.0 }

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            method: default_method(),
            window: default_window(),
            alpha: default_alpha(),
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { window: default_window() }
    }
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self { period: default_period() }
    }
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self { threshold: default_threshold() }
    }
}

impl Config {
    /// Loads the given file, or the per-user config file when no path is given.
    /// A missing per-user file falls back to the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Ok(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!("Config file '{}' not found", path.display())));
        }

        log::debug!("Loading config from: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config/trend-analyzer/config.toml"))
    }
}
