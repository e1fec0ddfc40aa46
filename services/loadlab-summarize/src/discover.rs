use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SummarizeError;

/// Lists report files directly inside `dir` whose extension is `extension`.
///
/// Subdirectories are not descended into. Results are sorted by path so a run
/// processes files in the same order every time.
pub fn discover_reports(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SummarizeError> {
    let extension = extension.trim_start_matches('.');
    let read_error = |source: std::io::Error| SummarizeError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut reports = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == extension)
                .unwrap_or(false)
        {
            reports.push(path);
        }
    }

    reports.sort();
    Ok(reports)
}
