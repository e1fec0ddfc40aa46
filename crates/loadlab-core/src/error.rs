use std::path::PathBuf;

use thiserror::Error;

/// Error type for report classification and extraction.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The file stem does not start with a known profile, or the remainder
    /// does not start with a known test type.
    #[error("could not parse framework and test type from filename: {stem}")]
    Classification {
        /// File stem that failed to classify.
        stem: String,
    },

    /// The report parsed as JSON but a field has the wrong shape.
    #[error("malformed report {}: {reason}", path.display())]
    MalformedInput {
        /// Report that contained the bad field.
        path: PathBuf,
        /// Human-readable description of the offending field.
        reason: String,
    },

    /// The report is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the report from disk failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Creates a `Classification` variant.
    #[must_use]
    pub fn classification(stem: impl Into<String>) -> Self {
        Self::Classification { stem: stem.into() }
    }

    /// Returns true for the only error a caller is expected to recover from.
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Classification { .. })
    }
}

/// Shape error raised while walking a document, before a file path is known.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field `{field}`: expected {expected}, found {found}")]
pub struct ShapeError {
    pub field: String,
    pub expected: &'static str,
    pub found: &'static str,
}

impl ShapeError {
    /// Attaches the report path, producing a `MalformedInput` error.
    pub fn at(self, path: impl Into<PathBuf>) -> CoreError {
        CoreError::MalformedInput {
            path: path.into(),
            reason: self.to_string(),
        }
    }
}

/// Convenience alias for core results.
pub type CoreResult<T> = Result<T, CoreError>;
