//! Per-interval metrics from a report's `intermediate` snapshots.

use serde::Serialize;
use serde_json::Value;

use crate::aggregate::{HTTP_200, REQUEST_RATE, VUSERS_COMPLETED, VUSERS_CREATED, VUSERS_FAILED};
use crate::classify::{Labels, Profile, TestType};
use crate::document::{type_name, Section};
use crate::error::ShapeError;
use crate::value::MetricValue;

const MILLIS_PER_SECOND: i64 = 1000;

/// One row of the timeseries table. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeseriesRecord {
    pub relative_sec: i64,
    #[serde(rename = "framework")]
    pub profile: Profile,
    pub test_type: TestType,
    pub http_200: MetricValue,
    pub vusers_failed: MetricValue,
    pub vusers_created: MetricValue,
    pub vusers_completed: MetricValue,
    pub request_rate: MetricValue,
    pub success_percent: MetricValue,
    pub error_percent: MetricValue,
}

/// Column names, in the order `TimeseriesRecord` serializes them.
pub const TIMESERIES_COLUMNS: [&str; 10] = [
    "relative_sec",
    "framework",
    "test_type",
    "http_200",
    "vusers_failed",
    "vusers_created",
    "vusers_completed",
    "request_rate",
    "success_percent",
    "error_percent",
];

/// Extracts one record per snapshot in `snapshots`.
///
/// The first snapshot's period is time zero for the report; offsets are
/// floor-divided to whole seconds.
pub fn extract_timeseries(
    labels: Labels,
    snapshots: &[Value],
) -> Result<Vec<TimeseriesRecord>, ShapeError> {
    let Some(first) = snapshots.first() else {
        return Ok(Vec::new());
    };
    let baseline = period_ms(&Section::from_object("intermediate[0]", first)?)?;

    snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let entry = Section::from_object(format!("intermediate[{index}]"), snapshot)?;
            snapshot_record(labels, baseline, &entry)
        })
        .collect()
}

fn snapshot_record(
    labels: Labels,
    baseline: i64,
    entry: &Section<'_>,
) -> Result<TimeseriesRecord, ShapeError> {
    let period = period_ms(entry)?;
    let counters = entry.section("counters")?;
    let rates = entry.section("rates")?;

    let completed = counters.number_or(VUSERS_COMPLETED, MetricValue::ZERO)?;
    let failed = counters.number_or(VUSERS_FAILED, MetricValue::ZERO)?;
    let total = completed.add(failed);

    Ok(TimeseriesRecord {
        relative_sec: (period - baseline).div_euclid(MILLIS_PER_SECOND),
        profile: labels.profile,
        test_type: labels.test_type,
        http_200: counters.number_or(HTTP_200, MetricValue::ZERO)?,
        vusers_failed: failed,
        vusers_created: counters.number_or(VUSERS_CREATED, MetricValue::ZERO)?,
        vusers_completed: completed,
        request_rate: rates.number_or(REQUEST_RATE, MetricValue::ZERO)?,
        success_percent: MetricValue::percent_of(completed, total).unwrap_or(MetricValue::ZERO),
        error_percent: MetricValue::percent_of(failed, total).unwrap_or(MetricValue::ZERO),
    })
}

/// Reads the required `period` of a snapshot as integral milliseconds.
///
/// Accepts integers, floats (truncated) and decimal-integer strings.
fn period_ms(entry: &Section<'_>) -> Result<i64, ShapeError> {
    let shape_error = |found| ShapeError {
        field: entry.child("period"),
        expected: "integer period",
        found,
    };

    match entry.get("period") {
        None => Err(shape_error("nothing")),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| shape_error("number")),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| shape_error("string")),
        Some(other) => Err(shape_error(type_name(other))),
    }
}
