//! Whole-run summary metrics from a report's `aggregate` section.

use serde::Serialize;

use crate::classify::{Labels, Profile, TestType};
use crate::document::Section;
use crate::error::ShapeError;
use crate::value::MetricValue;

/// Summary key holding response-time statistics.
pub const RESPONSE_TIME_SUMMARY: &str = "http.response_time";

pub const TOTAL_REQUESTS: &str = "http.requests";
pub const HTTP_200: &str = "http.codes.200";
pub const VUSERS_FAILED: &str = "vusers.failed";
pub const VUSERS_CREATED: &str = "vusers.created";
pub const VUSERS_COMPLETED: &str = "vusers.completed";
pub const REQUEST_RATE: &str = "http.request_rate";

/// Metric names of the aggregate table, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMetric {
    MinResponseTime,
    MedianResponseTime,
    P95ResponseTime,
    P99ResponseTime,
    MaxResponseTime,
    MeanResponseTime,
    TotalRequests,
    SuccessfulRequests,
    FailedRequests,
    TotalVusers,
    CompletedVusers,
    RequestsPerSecond,
    ErrorRate,
}

impl AggregateMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinResponseTime => "min_response_time",
            Self::MedianResponseTime => "median_response_time",
            Self::P95ResponseTime => "p95_response_time",
            Self::P99ResponseTime => "p99_response_time",
            Self::MaxResponseTime => "max_response_time",
            Self::MeanResponseTime => "mean_response_time",
            Self::TotalRequests => "total_requests",
            Self::SuccessfulRequests => "successful_requests",
            Self::FailedRequests => "failed_requests",
            Self::TotalVusers => "total_vusers",
            Self::CompletedVusers => "completed_vusers",
            Self::RequestsPerSecond => "requests_per_second",
            Self::ErrorRate => "error_rate",
        }
    }
}

/// Response-time statistics: (metric, key inside the summary).
const RESPONSE_TIME_FIELDS: [(AggregateMetric, &str); 6] = [
    (AggregateMetric::MinResponseTime, "min"),
    (AggregateMetric::MedianResponseTime, "median"),
    (AggregateMetric::P95ResponseTime, "p95"),
    (AggregateMetric::P99ResponseTime, "p99"),
    (AggregateMetric::MaxResponseTime, "max"),
    (AggregateMetric::MeanResponseTime, "mean"),
];

/// Counters: (metric, key inside `counters`).
const COUNTER_FIELDS: [(AggregateMetric, &str); 5] = [
    (AggregateMetric::TotalRequests, TOTAL_REQUESTS),
    (AggregateMetric::SuccessfulRequests, HTTP_200),
    (AggregateMetric::FailedRequests, VUSERS_FAILED),
    (AggregateMetric::TotalVusers, VUSERS_CREATED),
    (AggregateMetric::CompletedVusers, VUSERS_COMPLETED),
];

/// One row of the aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    #[serde(rename = "framework")]
    pub profile: Profile,
    pub test_type: TestType,
    pub metric: AggregateMetric,
    pub value: MetricValue,
}

/// Extracts aggregate records from the `aggregate` section of a report.
///
/// An absent or empty section yields no records. `error_rate` is only
/// emitted when the total request count is positive.
pub fn extract_aggregate(
    labels: Labels,
    aggregate: &Section<'_>,
) -> Result<Vec<AggregateRecord>, ShapeError> {
    if aggregate.is_empty() {
        return Ok(Vec::new());
    }

    let response_time = aggregate
        .section("summaries")?
        .section(RESPONSE_TIME_SUMMARY)?;
    let counters = aggregate.section("counters")?;
    let rates = aggregate.section("rates")?;

    let record = |metric, value| AggregateRecord {
        profile: labels.profile,
        test_type: labels.test_type,
        metric,
        value,
    };

    let mut records = Vec::with_capacity(RESPONSE_TIME_FIELDS.len() + COUNTER_FIELDS.len() + 2);

    for (metric, key) in RESPONSE_TIME_FIELDS {
        records.push(record(metric, response_time.number_or(key, MetricValue::ZERO)?));
    }

    for (metric, key) in COUNTER_FIELDS {
        records.push(record(metric, counters.number_or(key, MetricValue::ZERO)?));
    }

    records.push(record(
        AggregateMetric::RequestsPerSecond,
        rates.number_or(REQUEST_RATE, MetricValue::ZERO)?,
    ));

    let total = counters.number_or(TOTAL_REQUESTS, MetricValue::ZERO)?;
    let success = counters.number_or(HTTP_200, MetricValue::ZERO)?;
    if let Some(rate) = error_rate(total, success) {
        records.push(record(AggregateMetric::ErrorRate, rate));
    }

    Ok(records)
}

/// `(total - success) / total * 100`, or `None` when `total` is not positive.
pub fn error_rate(total: MetricValue, success: MetricValue) -> Option<MetricValue> {
    if !total.is_positive() {
        return None;
    }
    let total = total.as_f64();
    Some(MetricValue::Float((total - success.as_f64()) / total * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const LABELS: Labels = Labels {
        profile: Profile::FastapiAsync,
        test_type: TestType::Spike,
    };

    fn extract(doc: &Value) -> Result<Vec<AggregateRecord>, ShapeError> {
        let root = Section::root(doc).unwrap();
        extract_aggregate(LABELS, &root.section("aggregate").unwrap())
    }

    fn value_of(records: &[AggregateRecord], metric: AggregateMetric) -> Option<MetricValue> {
        records.iter().find(|r| r.metric == metric).map(|r| r.value)
    }

    #[test]
    fn empty_or_missing_section_yields_nothing() {
        assert!(extract(&json!({})).unwrap().is_empty());
        assert!(extract(&json!({ "aggregate": {} })).unwrap().is_empty());
        assert!(extract(&json!({ "aggregate": null })).unwrap().is_empty());
    }

    #[test]
    fn full_section() {
        let doc = json!({
            "aggregate": {
                "summaries": {
                    "http.response_time": {
                        "min": 1, "median": 12.5, "p95": 40.1, "p99": 88, "max": 120, "mean": 15.3
                    }
                },
                "counters": {
                    "http.requests": 100,
                    "http.codes.200": 95,
                    "vusers.failed": 2,
                    "vusers.created": 50,
                    "vusers.completed": 48
                },
                "rates": { "http.request_rate": 33 }
            }
        });

        let records = extract(&doc).unwrap();
        assert_eq!(records.len(), 13);

        let metrics: Vec<&str> = records.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(
            metrics,
            vec![
                "min_response_time",
                "median_response_time",
                "p95_response_time",
                "p99_response_time",
                "max_response_time",
                "mean_response_time",
                "total_requests",
                "successful_requests",
                "failed_requests",
                "total_vusers",
                "completed_vusers",
                "requests_per_second",
                "error_rate",
            ]
        );

        assert_eq!(
            value_of(&records, AggregateMetric::MedianResponseTime),
            Some(MetricValue::Float(12.5))
        );
        assert_eq!(
            value_of(&records, AggregateMetric::CompletedVusers),
            Some(MetricValue::Int(48))
        );
        assert_eq!(
            value_of(&records, AggregateMetric::ErrorRate),
            Some(MetricValue::Float(5.0))
        );
        assert!(records
            .iter()
            .all(|r| r.profile == Profile::FastapiAsync && r.test_type == TestType::Spike));
    }

    #[test]
    fn zero_requests_suppresses_error_rate() {
        let doc = json!({
            "aggregate": { "counters": { "http.requests": 0, "http.codes.200": 0 } }
        });
        let records = extract(&doc).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(value_of(&records, AggregateMetric::ErrorRate), None);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let doc = json!({ "aggregate": { "rates": {} } });
        let records = extract(&doc).unwrap();
        assert_eq!(records.len(), 12);
        assert!(records.iter().all(|r| r.value == MetricValue::ZERO));
    }

    #[test]
    fn non_numeric_counter_is_rejected() {
        let doc = json!({ "aggregate": { "counters": { "http.requests": "lots" } } });
        let err = extract(&doc).unwrap_err();
        assert_eq!(err.field, "aggregate.counters.http.requests");
    }

    #[test]
    fn error_rate_matches_reference_values() {
        assert_eq!(
            error_rate(MetricValue::Int(10), MetricValue::Int(8)),
            Some(MetricValue::Float(20.0))
        );
        assert_eq!(error_rate(MetricValue::Int(0), MetricValue::Int(8)), None);
    }
}
