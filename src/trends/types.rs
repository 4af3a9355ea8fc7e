use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Sma,   // Simple moving average
    Ema,   // Simple exponential smoothing
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Sma => write!(f, "SMA"),
            ForecastMethod::Ema => write!(f, "EMA"),
        }
    }
}

/// Tuning for a forecast run. Only the field matching `method` is consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastParams {
    pub periods: usize,
    pub method: ForecastMethod,
    pub window: usize,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub period: usize,
    pub forecast: f64,
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
    InsufficientData,  // Not enough history for two full windows
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
            TrendDirection::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendStrength {
    Strong,     // More than 15% change between windows
    Moderate,
    None,
}

impl TrendStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStrength::Strong => "strong",
            TrendStrength::Moderate => "moderate",
            TrendStrength::None => "none",
        }
    }
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierType {
    High,
    Low,
}

impl OutlierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierType::High => "high",
            OutlierType::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SeasonalPattern {
    #[serde(rename = "Strong seasonal pattern")]
    Strong,
    #[serde(rename = "Moderate seasonal pattern")]
    Moderate,
    #[serde(rename = "No clear seasonality")]
    None,
}

impl SeasonalPattern {
    pub fn from_variation(variation_pct: f64) -> Self {
        if variation_pct > 20.0 {
            SeasonalPattern::Strong
        } else if variation_pct > 10.0 {
            SeasonalPattern::Moderate
        } else {
            SeasonalPattern::None
        }
    }
}

impl fmt::Display for SeasonalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonalPattern::Strong => write!(f, "Strong seasonal pattern"),
            SeasonalPattern::Moderate => write!(f, "Moderate seasonal pattern"),
            SeasonalPattern::None => write!(f, "No clear seasonality"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityReport {
    pub has_seasonality: bool,
    #[serde(flatten)]
    pub detail: SeasonalityDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeasonalityDetail {
    /// Fewer than two full cycles were available.
    Insufficient { message: String },
    Analyzed {
        period: usize,
        cycle_averages: Vec<f64>,
        variation_pct: f64,
        interpretation: SeasonalPattern,
    },
}

impl SeasonalityReport {
    pub fn interpretation(&self) -> Option<SeasonalPattern> {
        match &self.detail {
            SeasonalityDetail::Analyzed { interpretation, .. } => Some(*interpretation),
            SeasonalityDetail::Insufficient { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficient_of_variation: Option<f64>,
    pub median: f64,
    pub p25: f64,
    pub p75: f64,
}

/// Serializes to `{}` when the series was empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    #[serde(flatten)]
    pub summary: Option<Summary>,
}
