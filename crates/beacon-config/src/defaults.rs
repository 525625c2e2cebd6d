//! Default values for every setting.

use crate::schema::{BeaconSettings, LogFormat, LoggingSettings, RequestSettings, Settings};
use std::path::PathBuf;

/// Refresh interval used when the settings file names none.
pub const DEFAULT_INTERVAL_MS: u64 = 60_000;

/// Period between simulated requests.
pub const DEFAULT_REQUEST_EVERY_MS: u64 = 1_000;

/// Source file read when none is configured.
pub const DEFAULT_SOURCE_PATH: &str = "beacon.txt";

impl Default for Settings {
    fn default() -> Self {
        Self {
            beacon: BeaconSettings::default(),
            logging: LoggingSettings::default(),
            requests: RequestSettings::default(),
        }
    }
}

impl Default for BeaconSettings {
    fn default() -> Self {
        // No default name: a settings file or BEACON_NAME must provide one.
        Self {
            name: String::new(),
            interval_ms: DEFAULT_INTERVAL_MS,
            default_value: None,
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file_path: None,
            include_spans: false,
        }
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            every_ms: DEFAULT_REQUEST_EVERY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.beacon.name.is_empty());
        assert_eq!(settings.beacon.interval(), Duration::from_secs(60));
        assert_eq!(settings.beacon.source_path, PathBuf::from("beacon.txt"));
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert_eq!(settings.requests.period(), Duration::from_secs(1));
    }
}
