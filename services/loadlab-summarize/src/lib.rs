//! Report summarizer: turns a directory of Artillery JSON reports into an
//! aggregate CSV and a timeseries CSV.

pub mod config;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use config::{ConfigError, LoggingConfig, PathsConfig, SummarizeConfig};
pub use error::SummarizeError;
pub use pipeline::{SummaryStats, Summarizer, Tables};
