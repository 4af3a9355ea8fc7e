pub mod analyzer;
pub mod stats;
pub mod types;

pub use analyzer::TrendAnalyzer;
pub use types::{
    Confidence, ForecastMethod, ForecastParams, ForecastPoint, OutlierType, PointKind,
    SeasonalPattern, SeasonalityDetail, SeasonalityReport, Statistics, Summary,
    TrendDirection, TrendStrength,
};
