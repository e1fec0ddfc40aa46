//! CSV emission for the two output tables.

use std::io;
use std::path::Path;

use csv::WriterBuilder;
use loadlab_core::{AggregateRecord, TimeseriesRecord, TIMESERIES_COLUMNS};

use crate::error::SummarizeError;

/// Header of the aggregate table. Always written, even with no rows.
pub const AGGREGATE_HEADER: [&str; 4] = ["framework", "test_type", "metric", "value"];

/// Writes the aggregate table to `writer`.
pub fn write_aggregate<W: io::Write>(writer: W, records: &[AggregateRecord]) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(AGGREGATE_HEADER)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the timeseries table to `writer`. Nothing at all is written for
/// zero records, not even the header.
pub fn write_timeseries<W: io::Write>(writer: W, records: &[TimeseriesRecord]) -> csv::Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(TIMESERIES_COLUMNS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the aggregate table to `path`, replacing any previous file.
pub fn write_aggregate_csv(path: &Path, records: &[AggregateRecord]) -> Result<(), SummarizeError> {
    let file = create(path)?;
    write_aggregate(file, records).map_err(|source| SummarizeError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the timeseries table to `path` if there is at least one record.
///
/// Returns whether the file was written. With no records an existing file at
/// `path` is left as it is.
pub fn write_timeseries_csv(
    path: &Path,
    records: &[TimeseriesRecord],
) -> Result<bool, SummarizeError> {
    if records.is_empty() {
        return Ok(false);
    }
    let file = create(path)?;
    write_timeseries(file, records).map_err(|source| SummarizeError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

fn create(path: &Path) -> Result<std::fs::File, SummarizeError> {
    std::fs::File::create(path).map_err(|source| SummarizeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadlab_core::{AggregateMetric, MetricValue, Profile, TestType};

    fn to_string(write: impl FnOnce(&mut Vec<u8>) -> csv::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_aggregate_header_only() {
        let out = to_string(|buf| write_aggregate(buf, &[]));
        assert_eq!(out, "framework,test_type,metric,value\n");
    }

    #[test]
    fn test_aggregate_rows() {
        let records = vec![
            AggregateRecord {
                profile: Profile::FastapiAsync,
                test_type: TestType::Spike,
                metric: AggregateMetric::TotalRequests,
                value: MetricValue::Int(10),
            },
            AggregateRecord {
                profile: Profile::FastapiAsync,
                test_type: TestType::Spike,
                metric: AggregateMetric::ErrorRate,
                value: MetricValue::Float(20.0),
            },
        ];

        let out = to_string(|buf| write_aggregate(buf, &records));
        assert_eq!(
            out,
            "framework,test_type,metric,value\n\
             fastapi-async,spike,total_requests,10\n\
             fastapi-async,spike,error_rate,20.0\n"
        );
    }

    #[test]
    fn test_timeseries_columns() {
        let records = vec![TimeseriesRecord {
            relative_sec: 5,
            profile: Profile::Express,
            test_type: TestType::BreakpointRead,
            http_200: MetricValue::Int(40),
            vusers_failed: MetricValue::Int(1),
            vusers_created: MetricValue::Int(5),
            vusers_completed: MetricValue::Int(3),
            request_rate: MetricValue::Float(8.5),
            success_percent: MetricValue::Float(75.0),
            error_percent: MetricValue::Float(25.0),
        }];

        let out = to_string(|buf| write_timeseries(buf, &records));
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "relative_sec,framework,test_type,http_200,vusers_failed,vusers_created,\
             vusers_completed,request_rate,success_percent,error_percent"
        );
        assert_eq!(
            lines.next().unwrap(),
            "5,express,breakpoint-read,40,1,5,3,8.5,75.0,25.0"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_columns_match_record_fields() {
        // Header inferred by csv from the struct must equal the fixed column list.
        let record = TimeseriesRecord {
            relative_sec: 0,
            profile: Profile::Express,
            test_type: TestType::Soak,
            http_200: MetricValue::ZERO,
            vusers_failed: MetricValue::ZERO,
            vusers_created: MetricValue::ZERO,
            vusers_completed: MetricValue::ZERO,
            request_rate: MetricValue::ZERO,
            success_percent: MetricValue::ZERO,
            error_percent: MetricValue::ZERO,
        };
        let out = to_string(|buf| {
            let mut csv = WriterBuilder::new().has_headers(true).from_writer(buf);
            csv.serialize(&record)?;
            csv.flush()?;
            Ok(())
        });
        assert_eq!(out.lines().next().unwrap(), TIMESERIES_COLUMNS.join(","));
    }

    #[test]
    fn test_empty_timeseries_writes_nothing() {
        let out = to_string(|buf| write_timeseries(buf, &[]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_timeseries_skips_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ts.csv");
        assert!(!write_timeseries_csv(&path, &[]).unwrap());
        assert!(!path.exists());
    }
}
