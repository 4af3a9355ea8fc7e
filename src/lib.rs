pub mod app;
pub mod config;
pub mod error;
pub mod series;
pub mod trends;

pub use app::{Job, Operation};
pub use config::Config;
pub use error::{Error, Result};
pub use trends::TrendAnalyzer;
