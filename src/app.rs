use crate::error::Result;
use crate::series::{load_series, write_json};
use crate::trends::{ForecastParams, TrendAnalyzer};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Forecast(ForecastParams),
    DetectTrends { window: usize },
    Seasonality { period: usize },
    Outliers { threshold: f64 },
    Statistics,
}

/// One fully resolved invocation: every default has already been filled in.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub value_field: String,
    pub operation: Operation,
}

/// Reads the input, runs the operation and writes the output document.
/// Returns the human-readable progress lines for the caller to print.
pub fn run(job: &Job) -> Result<Vec<String>> {
    let series = load_series(&job.input)?;
    let analyzer = TrendAnalyzer::new(job.value_field.as_str());

    log::info!(
        "Running {:?} on '{}' over {} records",
        job.operation, analyzer.value_field(), series.len()
    );

    let mut summary = match &job.operation {
        Operation::Forecast(params) => {
            let points = analyzer.forecast(&series, params)?;
            write_json(&points, &job.output)?;
            vec![format!(
                "Generated forecast for {} periods using {}",
                params.periods, params.method
            )]
        }
        Operation::DetectTrends { window } => {
            let annotated = analyzer.detect_trends(&series, *window)?;
            write_json(&annotated, &job.output)?;
            vec![format!("Analyzed trends with {}-period window", window)]
        }
        Operation::Seasonality { period } => {
            let report = analyzer.detect_seasonality(&series, *period)?;
            write_json(&report, &job.output)?;

            let mut lines = vec![
                "Seasonality analysis complete".to_string(),
                format!("   Has seasonality: {}", report.has_seasonality),
            ];
            if let Some(pattern) = report.interpretation() {
                lines.push(format!("   {}", pattern));
            }
            lines
        }
        Operation::Outliers { threshold } => {
            let annotated = analyzer.detect_outliers(&series, *threshold)?;
            write_json(&annotated, &job.output)?;

            let outlier_count = annotated
                .iter()
                .filter(|r| r.get("is_outlier").and_then(|v| v.as_bool()).unwrap_or(false))
                .count();
            vec![
                "Outlier detection complete".to_string(),
                format!("   Found {} outliers out of {} data points", outlier_count, annotated.len()),
            ]
        }
        Operation::Statistics => {
            let stats = analyzer.statistics(&series)?;
            write_json(&stats, &job.output)?;

            let (mean, std_dev) = stats
                .summary
                .as_ref()
                .map(|s| (s.mean, s.std_dev.unwrap_or(0.0)))
                .unwrap_or((0.0, 0.0));
            vec![
                "Statistical analysis complete".to_string(),
                format!("   Mean: {}, Std Dev: {}", mean, std_dev),
            ]
        }
    };

    summary.push(format!("   Output written to '{}'", job.output.display()));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::trends::ForecastMethod;
    use serde_json::{json, Value};
    use std::fs;

    fn job(dir: &tempfile::TempDir, input: Value, operation: Operation) -> Job {
        let input_path = dir.path().join("input.json");
        fs::write(&input_path, input.to_string()).unwrap();
        Job {
            input: input_path,
            output: dir.path().join("output.json"),
            value_field: "value".to_string(),
            operation,
        }
    }

    fn read_output(job: &Job) -> Value {
        serde_json::from_str(&fs::read_to_string(&job.output).unwrap()).unwrap()
    }

    #[test]
    fn test_forecast_job() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(
            &dir,
            json!([{"value": 10}, {"value": 10}, {"value": 10}]),
            Operation::Forecast(ForecastParams {
                periods: 2,
                method: ForecastMethod::Sma,
                window: 3,
                alpha: 0.3,
            }),
        );

        let summary = run(&job).unwrap();
        assert_eq!(summary[0], "Generated forecast for 2 periods using SMA");
        assert!(summary.last().unwrap().contains("Output written to"));
        assert_eq!(
            read_output(&job),
            json!([
                {"period": 1, "forecast": 10.0, "type": "forecast"},
                {"period": 2, "forecast": 10.0, "type": "forecast"}
            ])
        );
    }

    #[test]
    fn test_outlier_summary() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(
            &dir,
            json!([
                {"value": 1}, {"value": 1}, {"value": 1}, {"value": 1},
                {"value": 1}, {"value": 1}, {"value": 1}, {"value": 100}
            ]),
            Operation::Outliers { threshold: 2.0 },
        );

        let summary = run(&job).unwrap();
        assert_eq!(summary[1], "   Found 1 outliers out of 8 data points");
    }

    #[test]
    fn test_statistics_on_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(&dir, json!([]), Operation::Statistics);

        let summary = run(&job).unwrap();
        assert_eq!(summary[1], "   Mean: 0, Std Dev: 0");
        assert_eq!(read_output(&job), json!({}));
    }

    #[test]
    fn test_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(
            &dir,
            json!([{"value": 1}]),
            Operation::Forecast(ForecastParams {
                periods: 7,
                method: ForecastMethod::Sma,
                window: 7,
                alpha: 0.3,
            }),
        );

        assert!(matches!(run(&job), Err(Error::InsufficientData { .. })));
        assert!(!job.output.exists());
    }
}
