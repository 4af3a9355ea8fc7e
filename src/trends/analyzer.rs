use super::stats::{mean, nearest_index, round2, sample_std_dev};
use super::types::{
    Confidence, ForecastMethod, ForecastParams, ForecastPoint, OutlierType, PointKind,
    SeasonalPattern, SeasonalityDetail, SeasonalityReport, Statistics, Summary,
    TrendDirection, TrendStrength,
};
use crate::error::{Error, Result};
use crate::series::{field_values, Record};
use serde_json::Value;

/// Percentage change between consecutive windows that counts as a trend.
const TREND_THRESHOLD_PCT: f64 = 5.0;
const STRONG_TREND_THRESHOLD_PCT: f64 = 15.0;
/// Average per-position deviation from the overall mean that counts as seasonal.
const SEASONALITY_THRESHOLD_PCT: f64 = 10.0;

/// Pure operations over an ordered series, reading one numeric field.
///
/// Every operation validates the field on all records before computing
/// anything and returns freshly allocated output; the input is never touched.
pub struct TrendAnalyzer {
    value_field: String,
}

impl TrendAnalyzer {
    pub fn new(value_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
        }
    }

    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    fn values(&self, series: &[Record]) -> Result<Vec<f64>> {
        field_values(series, &self.value_field)
    }

    /// Flat forecast: every future period repeats a single level.
    pub fn forecast(&self, series: &[Record], params: &ForecastParams) -> Result<Vec<ForecastPoint>> {
        let values = self.values(series)?;

        let (level, confidence) = match params.method {
            ForecastMethod::Sma => (moving_average_level(&values, params.window)?, None),
            ForecastMethod::Ema => (
                exponential_smoothing_level(&values, params.alpha)?,
                Some(Confidence::Medium),
            ),
        };

        log::debug!(
            "{} level {:.4} over {} points, forecasting {} periods",
            params.method, level, values.len(), params.periods
        );

        Ok((1..=params.periods)
            .map(|period| ForecastPoint {
                period,
                forecast: round2(level),
                kind: PointKind::Forecast,
                confidence,
            })
            .collect())
    }

    /// Compares each trailing window with the window right before it.
    pub fn detect_trends(&self, series: &[Record], window: usize) -> Result<Vec<Record>> {
        if window == 0 {
            return Err(Error::InvalidParameter("trend window must be at least 1".to_string()));
        }
        let values = self.values(series)?;

        Ok(series
            .iter()
            .enumerate()
            .map(|(i, record)| {
                // Degenerate cases report an integer 0, computed ones a float.
                let (direction, strength, change_pct) = if i >= window {
                    let current_start = i + 1 - window;
                    let current_avg = mean(&values[current_start..=i]);
                    let previous_avg = mean(&previous_window(&values, current_start, window));

                    if previous_avg != 0.0 {
                        let change_pct = (current_avg - previous_avg) / previous_avg * 100.0;
                        let (direction, strength) = classify_change(change_pct);
                        (direction, strength, Value::from(round2(change_pct)))
                    } else {
                        (TrendDirection::Stable, TrendStrength::None, Value::from(0))
                    }
                } else {
                    (TrendDirection::InsufficientData, TrendStrength::None, Value::from(0))
                };

                let mut result = record.clone();
                result.insert("trend".to_string(), Value::from(direction.as_str()));
                result.insert("trend_strength".to_string(), Value::from(strength.as_str()));
                result.insert("trend_change_pct".to_string(), change_pct);
                result
            })
            .collect())
    }

    /// Averages the series per position within a cycle of `period` records.
    pub fn detect_seasonality(&self, series: &[Record], period: usize) -> Result<SeasonalityReport> {
        if period == 0 {
            return Err(Error::InvalidParameter("seasonal period must be at least 1".to_string()));
        }
        let values = self.values(series)?;

        // Two full cycles are required; a period too large to double can never be met.
        let enough = period.checked_mul(2).is_some_and(|needed| values.len() >= needed);
        if !enough {
            log::debug!(
                "Seasonality needs two cycles of {} points, got {}",
                period, values.len()
            );
            return Ok(SeasonalityReport {
                has_seasonality: false,
                detail: SeasonalityDetail::Insufficient {
                    message: "Insufficient data for seasonality detection".to_string(),
                },
            });
        }

        // (sum, count) per position in the cycle
        let mut buckets = vec![(0.0_f64, 0_usize); period];
        for (i, value) in values.iter().enumerate() {
            let bucket = &mut buckets[i % period];
            bucket.0 += value;
            bucket.1 += 1;
        }

        let cycle_averages: Vec<f64> = buckets
            .iter()
            .map(|&(sum, count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect();
        let overall_mean = mean(&values);

        let variation_pct = if overall_mean != 0.0 {
            let deviations: Vec<f64> = cycle_averages
                .iter()
                .map(|avg| (avg - overall_mean).abs() / overall_mean * 100.0)
                .collect();
            mean(&deviations)
        } else {
            0.0
        };

        Ok(SeasonalityReport {
            has_seasonality: variation_pct > SEASONALITY_THRESHOLD_PCT,
            detail: SeasonalityDetail::Analyzed {
                period,
                cycle_averages: cycle_averages.into_iter().map(round2).collect(),
                variation_pct: round2(variation_pct),
                interpretation: SeasonalPattern::from_variation(variation_pct),
            },
        })
    }

    /// Z-score outlier flags against the whole-series mean and sample deviation.
    pub fn detect_outliers(&self, series: &[Record], threshold: f64) -> Result<Vec<Record>> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "outlier threshold must be a non-negative number, got {}",
                threshold
            )));
        }
        let values = self.values(series)?;
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let avg = mean(&values);
        let std_dev = sample_std_dev(&values);

        Ok(series
            .iter()
            .zip(&values)
            .map(|(record, &value)| {
                let mut result = record.clone();

                if std_dev > 0.0 {
                    let z_score = ((value - avg) / std_dev).abs();
                    let is_outlier = z_score > threshold;

                    result.insert("is_outlier".to_string(), Value::from(is_outlier));
                    result.insert("z_score".to_string(), Value::from(round2(z_score)));

                    if is_outlier {
                        let kind = if value > avg { OutlierType::High } else { OutlierType::Low };
                        result.insert("outlier_type".to_string(), Value::from(kind.as_str()));
                    }
                } else {
                    result.insert("is_outlier".to_string(), Value::from(false));
                    result.insert("z_score".to_string(), Value::from(0));
                }

                result
            })
            .collect())
    }

    pub fn statistics(&self, series: &[Record]) -> Result<Statistics> {
        let values = self.values(series)?;
        if values.is_empty() {
            return Ok(Statistics::default());
        }

        let avg = mean(&values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (std_dev, coefficient_of_variation) = if values.len() > 1 {
            let std_dev = sample_std_dev(&values);
            let cv = if avg != 0.0 { round2(std_dev / avg * 100.0) } else { 0.0 };
            (Some(round2(std_dev)), Some(cv))
        } else {
            (None, None)
        };

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Ok(Statistics {
            summary: Some(Summary {
                count: values.len(),
                mean: round2(avg),
                min: round2(min),
                max: round2(max),
                range: round2(max - min),
                std_dev,
                coefficient_of_variation,
                median: nearest_index(&sorted, 1, 2),
                p25: nearest_index(&sorted, 1, 4),
                p75: nearest_index(&sorted, 3, 4),
            }),
        })
    }
}

fn moving_average_level(values: &[f64], window: usize) -> Result<f64> {
    if window == 0 {
        return Err(Error::InvalidParameter("moving average window must be at least 1".to_string()));
    }
    if values.len() < window {
        return Err(Error::InsufficientData {
            operation: "SMA forecast",
            needed: window,
            got: values.len(),
        });
    }

    Ok(mean(&values[values.len() - window..]))
}

fn exponential_smoothing_level(values: &[f64], alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "smoothing alpha must be in (0, 1], got {}",
            alpha
        )));
    }
    let (&first, rest) = values.split_first().ok_or(Error::InsufficientData {
        operation: "EMA forecast",
        needed: 1,
        got: 0,
    })?;

    Ok(rest
        .iter()
        .fold(first, |smoothed, value| alpha * value + (1.0 - alpha) * smoothed))
}

/// The `window` values right before `current_start`. Near the head of the
/// series the window reaches past index 0 and wraps around to the tail, so it
/// always holds exactly `window` values.
fn previous_window(values: &[f64], current_start: usize, window: usize) -> Vec<f64> {
    let len = values.len();
    (0..window)
        .map(|k| values[(current_start + len - window + k) % len])
        .collect()
}

fn classify_change(change_pct: f64) -> (TrendDirection, TrendStrength) {
    let strength = if change_pct.abs() > STRONG_TREND_THRESHOLD_PCT {
        TrendStrength::Strong
    } else {
        TrendStrength::Moderate
    };

    if change_pct > TREND_THRESHOLD_PCT {
        (TrendDirection::Up, strength)
    } else if change_pct < -TREND_THRESHOLD_PCT {
        (TrendDirection::Down, strength)
    } else {
        (TrendDirection::Stable, TrendStrength::None)
    }
}
