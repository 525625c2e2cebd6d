//! Runtime validation of loaded settings.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Settings;

/// Settings validator.
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validates `settings`, reporting the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending setting.
    pub fn validate(settings: &Settings) -> ConfigResult<()> {
        if settings.beacon.name.trim().is_empty() {
            return Err(ConfigError::invalid("beacon.name", "must not be empty"));
        }

        if settings.beacon.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "beacon.interval_ms",
                "must be greater than zero",
            ));
        }

        if settings.beacon.source_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "beacon.source_path",
                "must not be empty",
            ));
        }

        if settings.requests.every_ms == 0 {
            return Err(ConfigError::invalid(
                "requests.every_ms",
                "must be greater than zero",
            ));
        }

        if settings.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }
}
