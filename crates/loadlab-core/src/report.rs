use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::aggregate::{extract_aggregate, AggregateRecord};
use crate::classify::{classify_path, Labels};
use crate::document::{is_empty_value, Section};
use crate::error::{CoreError, CoreResult};
use crate::timeseries::{extract_timeseries, TimeseriesRecord};

/// Everything extracted from one report file.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub labels: Labels,
    pub aggregate: Vec<AggregateRecord>,
    pub timeseries: Vec<TimeseriesRecord>,
}

/// Reads, parses, classifies and extracts a single report.
///
/// The body is parsed before the name is classified, so a file that is not
/// valid JSON fails with `Json` even when its name would not classify.
pub fn summarize_report(path: &Path) -> CoreResult<ReportSummary> {
    let payload = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&payload).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let labels = classify_path(path)?;
    summarize_document(path, labels, &document)
}

/// Runs both extractors over an already parsed report.
pub fn summarize_document(
    path: &Path,
    labels: Labels,
    document: &Value,
) -> CoreResult<ReportSummary> {
    let root = Section::root(document).map_err(|e| e.at(path))?;

    // An empty value of any type at the top level means "no data".
    let aggregate = if root.get("aggregate").map_or(true, is_empty_value) {
        Vec::new()
    } else {
        root.section("aggregate")
            .and_then(|section| extract_aggregate(labels, &section))
            .map_err(|e| e.at(path))?
    };

    let timeseries = if root.get("intermediate").map_or(true, is_empty_value) {
        Vec::new()
    } else {
        root.array("intermediate")
            .and_then(|snapshots| extract_timeseries(labels, snapshots))
            .map_err(|e| e.at(path))?
    };

    Ok(ReportSummary {
        path: path.to_path_buf(),
        labels,
        aggregate,
        timeseries,
    })
}
