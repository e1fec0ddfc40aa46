//! Configuration for the report summarizer.
//!
//! Sources, highest priority first:
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! The defaults reproduce the fixed layout of the benchmark suite, so running
//! the tool with no configuration at all reads `reports/*.json` and writes
//! both CSV files into the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "loadlab.toml";

/// Top-level summarizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input directory and output files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned (non-recursively) for reports (default: "reports")
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Report file extension, without the dot (default: "json")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Aggregate table output (default: "artillery_aggregate_metrics.csv")
    #[serde(default = "default_aggregate_csv")]
    pub aggregate_csv: PathBuf,

    /// Timeseries table output (default: "artillery_timeseries_metrics.csv")
    #[serde(default = "default_timeseries_csv")]
    pub timeseries_csv: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: pretty, compact or json (default: "pretty")
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_aggregate_csv() -> PathBuf {
    PathBuf::from("artillery_aggregate_metrics.csv")
}

fn default_timeseries_csv() -> PathBuf {
    PathBuf::from("artillery_timeseries_metrics.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            extension: default_extension(),
            aggregate_csv: default_aggregate_csv(),
            timeseries_csv: default_timeseries_csv(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SummarizeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&contents).map_err(|e| ConfigError::TomlError { path, source: e })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit `path` must exist. Without one, `loadlab.toml` in the
    /// working directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `LOADLAB_REPORTS_DIR` - Report directory
    /// - `LOADLAB_EXTENSION` - Report file extension
    /// - `LOADLAB_AGGREGATE_CSV` - Aggregate table output
    /// - `LOADLAB_TIMESERIES_CSV` - Timeseries table output
    /// - `LOADLAB_LOG_LEVEL` - Log level
    /// - `LOADLAB_LOG_FORMAT` - Log format
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("LOADLAB_REPORTS_DIR") {
            self.paths.reports_dir = PathBuf::from(dir);
        }

        if let Some(extension) = lookup("LOADLAB_EXTENSION") {
            self.paths.extension = extension;
        }

        if let Some(path) = lookup("LOADLAB_AGGREGATE_CSV") {
            self.paths.aggregate_csv = PathBuf::from(path);
        }

        if let Some(path) = lookup("LOADLAB_TIMESERIES_CSV") {
            self.paths.timeseries_csv = PathBuf::from(path);
        }

        if let Some(level) = lookup("LOADLAB_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("LOADLAB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extension = self.paths.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::ValidationError(
                "paths.extension cannot be empty".to_string(),
            ));
        }

        if self.paths.aggregate_csv.as_os_str().is_empty()
            || self.paths.timeseries_csv.as_os_str().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "output paths cannot be empty".to_string(),
            ));
        }

        if self.paths.aggregate_csv == self.paths.timeseries_csv {
            return Err(ConfigError::ValidationError(format!(
                "aggregate_csv and timeseries_csv must be different (both are {})",
                self.paths.aggregate_csv.display()
            )));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "compact" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of pretty, compact, json (got {:?})",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading configuration file
    #[error("Failed to read config file {path:?}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML in {path:?}: {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SummarizeConfig::default();
        assert_eq!(config.paths.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.paths.extension, "json");
        assert_eq!(
            config.paths.aggregate_csv,
            PathBuf::from("artillery_aggregate_metrics.csv")
        );
        assert_eq!(
            config.paths.timeseries_csv,
            PathBuf::from("artillery_timeseries_metrics.csv")
        );
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SummarizeConfig::from_toml_str(
            r#"
            [paths]
            reports_dir = "artillery_tests/reports"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.paths.reports_dir,
            PathBuf::from("artillery_tests/reports")
        );
        assert_eq!(config.paths.extension, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[paths]\naggregate_csv = \"out/agg.csv\"").unwrap();

        let config = SummarizeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.paths.aggregate_csv, PathBuf::from("out/agg.csv"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = SummarizeConfig::load(Some(Path::new("/nonexistent/loadlab.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LOADLAB_REPORTS_DIR", "/data/reports"),
            ("LOADLAB_TIMESERIES_CSV", "ts.csv"),
            ("LOADLAB_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = SummarizeConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.paths.reports_dir, PathBuf::from("/data/reports"));
        assert_eq!(config.paths.timeseries_csv, PathBuf::from("ts.csv"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.paths.extension, "json");
    }

    #[test]
    fn test_validation() {
        let mut config = SummarizeConfig::default();
        config.paths.timeseries_csv = config.paths.aggregate_csv.clone();
        assert!(config.validate().is_err());

        let mut config = SummarizeConfig::default();
        config.paths.extension = ".".to_string();
        assert!(config.validate().is_err());

        let mut config = SummarizeConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
