use clap::{Args as ClapArgs, Parser, Subcommand};
use clap::error::ErrorKind;
use std::path::PathBuf;
use trend_analyzer::app::{self, Job, Operation};
use trend_analyzer::trends::{ForecastMethod, ForecastParams};
use trend_analyzer::{Config, Result};

#[derive(Parser, Debug)]
#[command(name = "trend-analyzer")]
#[command(author, version, about = "Statistical analysis and forecasting for time series data", long_about = None)]
struct Args {
    #[command(subcommand)]
    operation: Command,

    #[arg(short, long, global = true, help = "Verbose logging")]
    verbose: bool,
}

#[derive(ClapArgs, Debug)]
struct Common {
    #[arg(long, help = "Input JSON file")]
    input: PathBuf,

    #[arg(long, help = "Output JSON file")]
    output: PathBuf,

    #[arg(long, help = "Field name to analyze", value_name = "FIELD")]
    value_field: String,

    #[arg(long, help = "Path to custom config file")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simple moving average or exponential smoothing forecast
    Forecast {
        #[command(flatten)]
        common: Common,

        #[arg(long, help = "Number of periods to forecast [default: 7]")]
        periods: Option<usize>,

        #[arg(long, value_enum, help = "Forecasting method [default: sma]")]
        method: Option<ForecastMethod>,

        #[arg(long, help = "Window size for moving average [default: 7]")]
        window: Option<usize>,

        #[arg(long, help = "Smoothing parameter for EMA (0-1) [default: 0.3]")]
        alpha: Option<f64>,
    },
    /// Identify upward/downward trends
    DetectTrends {
        #[command(flatten)]
        common: Common,

        #[arg(long, help = "Window size for trend detection [default: 7]")]
        trend_window: Option<usize>,
    },
    /// Detect seasonal patterns
    Seasonality {
        #[command(flatten)]
        common: Common,

        #[arg(long, help = "Seasonal period, e.g. 7 for weekly [default: 7]")]
        period: Option<usize>,
    },
    /// Identify anomalies in data
    Outliers {
        #[command(flatten)]
        common: Common,

        #[arg(long, help = "Standard deviation threshold for outliers [default: 2.0]")]
        threshold: Option<f64>,
    },
    /// Basic statistical measures
    Statistics {
        #[command(flatten)]
        common: Common,
    },
}

impl Command {
    fn common(&self) -> &Common {
        match self {
            Command::Forecast { common, .. }
            | Command::DetectTrends { common, .. }
            | Command::Seasonality { common, .. }
            | Command::Outliers { common, .. }
            | Command::Statistics { common } => common,
        }
    }

    /// Fills every unset flag from the config file (which carries the
    /// built-in defaults for anything it does not mention).
    fn into_job(self, config: &Config) -> Job {
        let (common, operation) = match self {
            Command::Forecast { common, periods, method, window, alpha } => (
                common,
                Operation::Forecast(ForecastParams {
                    periods: periods.unwrap_or(config.forecast.periods),
                    method: method.unwrap_or(config.forecast.method),
                    window: window.unwrap_or(config.forecast.window),
                    alpha: alpha.unwrap_or(config.forecast.alpha),
                }),
            ),
            Command::DetectTrends { common, trend_window } => (
                common,
                Operation::DetectTrends {
                    window: trend_window.unwrap_or(config.trends.window),
                },
            ),
            Command::Seasonality { common, period } => (
                common,
                Operation::Seasonality {
                    period: period.unwrap_or(config.seasonality.period),
                },
            ),
            Command::Outliers { common, threshold } => (
                common,
                Operation::Outliers {
                    threshold: threshold.unwrap_or(config.outliers.threshold),
                },
            ),
            Command::Statistics { common } => (common, Operation::Statistics),
        };

        Job {
            input: common.input,
            output: common.output,
            value_field: common.value_field,
            operation,
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    log::info!("Starting trend-analyzer v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        log::debug!("Aborting: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.operation.common().config.as_deref())?;
    let job = args.operation.into_job(&config);

    for line in app::run(&job)? {
        println!("{}", line);
    }

    Ok(())
}
