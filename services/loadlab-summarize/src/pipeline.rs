use loadlab_core::{summarize_report, AggregateRecord, TimeseriesRecord};
use tracing::{debug, info, warn};

use crate::config::PathsConfig;
use crate::discover::discover_reports;
use crate::error::SummarizeError;
use crate::writer::{write_aggregate_csv, write_timeseries_csv};

/// Counters describing one summarizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub aggregate_rows: usize,
    pub timeseries_rows: usize,
    pub timeseries_written: bool,
}

/// Rows accumulated across all reports of a run.
#[derive(Debug, Default)]
pub struct Tables {
    pub aggregate: Vec<AggregateRecord>,
    pub timeseries: Vec<TimeseriesRecord>,
}

/// Discovers reports, extracts both tables and writes them out.
///
/// Reports are processed one at a time. A report whose name does not
/// classify is skipped with a warning; any other failure aborts the run
/// before either output is written.
pub struct Summarizer {
    paths: PathsConfig,
}

impl Summarizer {
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Runs the whole pipeline and writes both outputs.
    pub fn run(&self) -> Result<SummaryStats, SummarizeError> {
        let (tables, mut stats) = self.collect()?;

        write_aggregate_csv(&self.paths.aggregate_csv, &tables.aggregate)?;
        stats.timeseries_written = write_timeseries_csv(&self.paths.timeseries_csv, &tables.timeseries)?;

        info!(
            aggregate_rows = stats.aggregate_rows,
            timeseries_rows = stats.timeseries_rows,
            skipped = stats.files_skipped,
            "Summary complete"
        );
        Ok(stats)
    }

    /// Discovers and extracts every report without writing anything.
    pub fn collect(&self) -> Result<(Tables, SummaryStats), SummarizeError> {
        let reports = discover_reports(&self.paths.reports_dir, &self.paths.extension)?;
        debug!(
            dir = %self.paths.reports_dir.display(),
            count = reports.len(),
            "Discovered reports"
        );

        let mut tables = Tables::default();
        let mut stats = SummaryStats {
            files_seen: reports.len(),
            ..SummaryStats::default()
        };

        for path in reports {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Processing {}", name);

            match summarize_report(&path) {
                Ok(summary) => {
                    debug!(
                        report = %summary.path.display(),
                        labels = %summary.labels,
                        aggregate_rows = summary.aggregate.len(),
                        timeseries_rows = summary.timeseries.len(),
                        "Extracted report"
                    );
                    stats.files_processed += 1;
                    tables.aggregate.extend(summary.aggregate);
                    tables.timeseries.extend(summary.timeseries);
                }
                Err(err) if err.is_classification() => {
                    warn!("Error processing {}: {}", path.display(), err);
                    stats.files_skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        stats.aggregate_rows = tables.aggregate.len();
        stats.timeseries_rows = tables.timeseries.len();
        Ok((tables, stats))
    }
}
