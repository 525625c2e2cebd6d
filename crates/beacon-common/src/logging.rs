//! Structured logging infrastructure for Beacon

use crate::error::{BeaconError, Result};
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "beacon_core=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Whether to use the compact single-line format
    pub compact_format: bool,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include spans in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            compact_format: false,
            pretty_format: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Build the environment filter, falling back to `info` on a bad directive.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &str) -> Result<Mutex<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Mutex::new(file))
}

/// Initialize the tracing subscriber with the given configuration
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber has already been installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter(&config.level));

    let installed = if config.json_format {
        let layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path.as_deref() {
            let file = open_log_file(file_path)?;
            registry.with(layer.with_writer(file)).try_init()
        } else {
            registry.with(layer).try_init()
        }
    } else if config.compact_format {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets)
            .compact();

        if let Some(file_path) = config.file_path.as_deref() {
            let file = open_log_file(file_path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        } else {
            registry.with(layer).try_init()
        }
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path.as_deref() {
            let file = open_log_file(file_path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        } else {
            registry.with(layer).try_init()
        }
    } else {
        let layer = fmt::layer()
            .with_span_events(span_events)
            .with_target(config.include_targets);

        if let Some(file_path) = config.file_path.as_deref() {
            let file = open_log_file(file_path)?;
            registry
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        } else {
            registry.with(layer).try_init()
        }
    };

    installed.map_err(|e| BeaconError::logging_with_source("failed to install subscriber", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(!config.compact_format);
        assert!(config.pretty_format);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_bad_directive_falls_back() {
        // Must not panic on garbage input.
        let _filter = env_filter("not a [valid directive");
    }

    #[test]
    fn test_missing_log_directory_is_an_error() {
        let result = init_logging(LoggingConfig {
            file_path: Some("/definitely/not/a/dir/beacon.log".to_string()),
            ..LoggingConfig::default()
        });
        assert!(matches!(result, Err(BeaconError::Io(_))));
    }
}
