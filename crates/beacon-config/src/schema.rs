//! Settings schema definitions using serde.

use beacon_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level settings for the `beacon` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The refreshed value.
    pub beacon: BeaconSettings,
    /// Log output.
    pub logging: LoggingSettings,
    /// Simulated request traffic.
    pub requests: RequestSettings,
}

/// What to refresh and how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconSettings {
    /// Key the value is exposed under in request locals.
    pub name: String,
    /// Delay between refresh cycles in milliseconds.
    pub interval_ms: u64,
    /// Value served before the first refresh completes.
    pub default_value: Option<String>,
    /// File whose contents are refreshed.
    pub source_path: PathBuf,
}

impl BeaconSettings {
    /// The refresh interval as a [`Duration`].
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// Default fmt output.
    Plain,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `beacon_core=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Write logs to this file instead of stdout.
    pub file_path: Option<String>,
    /// Include span enter/exit events.
    pub include_spans: bool,
}

impl LoggingSettings {
    /// Converts to the subscriber configuration used by `beacon_common`.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            compact_format: self.format == LogFormat::Compact,
            pretty_format: self.format == LogFormat::Pretty,
            file_path: self.file_path.clone(),
            include_spans: self.include_spans,
            include_targets: true,
        }
    }
}

/// Simulated request traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Milliseconds between simulated requests.
    pub every_ms: u64,
}

impl RequestSettings {
    /// The request period as a [`Duration`].
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.every_ms)
    }
}
