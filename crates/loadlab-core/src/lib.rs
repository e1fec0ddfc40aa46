//! Core extraction logic for loadlab load-test reports.
//!
//! A report is an Artillery JSON document whose file name carries the
//! service profile and the test scenario. This crate classifies the name and
//! flattens the report into aggregate and timeseries records.

pub mod aggregate;
pub mod classify;
pub mod document;
pub mod error;
pub mod report;
pub mod timeseries;
pub mod value;

pub use aggregate::{extract_aggregate, AggregateMetric, AggregateRecord};
pub use classify::{classify_path, classify_stem, Labels, Profile, TestType};
pub use document::Section;
pub use error::{CoreError, CoreResult, ShapeError};
pub use report::{summarize_document, summarize_report, ReportSummary};
pub use timeseries::{extract_timeseries, TimeseriesRecord, TIMESERIES_COLUMNS};
pub use value::MetricValue;
