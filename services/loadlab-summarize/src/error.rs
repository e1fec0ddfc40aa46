use std::path::PathBuf;

use loadlab_core::CoreError;

use crate::config::ConfigError;

/// Error type for a summarizer run. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("failed to read report directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Report(#[from] CoreError),

    #[error("failed to write {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
