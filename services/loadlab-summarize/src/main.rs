use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use loadlab_summarize::{LoggingConfig, SummarizeConfig, Summarizer};

#[derive(Parser, Debug)]
#[command(name = "loadlab-summarize")]
#[command(about = "Summarize Artillery load-test reports into CSV tables", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to ./loadlab.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the JSON reports
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// Report file extension
    #[arg(long)]
    extension: Option<String>,

    /// Aggregate metrics CSV output
    #[arg(long)]
    aggregate_csv: Option<PathBuf>,

    /// Time-series metrics CSV output
    #[arg(long)]
    timeseries_csv: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, compact, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut SummarizeConfig) {
        if let Some(dir) = self.reports_dir {
            config.paths.reports_dir = dir;
        }
        if let Some(extension) = self.extension {
            config.paths.extension = extension;
        }
        if let Some(path) = self.aggregate_csv {
            config.paths.aggregate_csv = path;
        }
        if let Some(path) = self.timeseries_csv {
            config.paths.timeseries_csv = path;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        SummarizeConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging(&config.logging);

    info!("Reports: {}", config.paths.reports_dir.display());

    let summarizer = Summarizer::new(config.paths.clone());
    let stats = summarizer.run().context("summary run failed")?;

    let paths = summarizer.paths();
    println!("\nAggregate metrics written to: {}", paths.aggregate_csv.display());
    if stats.timeseries_written {
        println!("Time-series metrics written to: {}", paths.timeseries_csv.display());
    } else {
        println!(
            "Time-series metrics not written (no interval data): {}",
            paths.timeseries_csv.display()
        );
    }

    Ok(())
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = fmt().with_env_filter(env_filter).with_target(false);
    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.init(),
    }
}
