//! Error types and utilities for Beacon.

use thiserror::Error;

/// Result type alias for Beacon operations.
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Error reported by an updater alongside (or instead of) its result.
///
/// Updater errors never stop a beacon; they are handed to the transformer.
pub type UpdateError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Beacon operations.
#[derive(Error, Debug)]
pub enum BeaconError {
    /// A required configuration field is missing or invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable description.
        message: String,
    },

    /// The refresh loop was stopped before its first cycle completed.
    #[error("Beacon '{name}' stopped before its first refresh completed")]
    Stopped {
        /// Name of the beacon.
        name: String,
    },

    /// Logging could not be initialized.
    #[error("Logging error: {message}")]
    Logging {
        /// Human readable description.
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BeaconError {
    /// Create a new invalid configuration error for `field`.
    pub fn invalid_config(field: &'static str, msg: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: msg.into(),
        }
    }

    /// Create a new stopped error for the beacon called `name`.
    pub fn stopped(name: impl Into<String>) -> Self {
        Self::Stopped { name: name.into() }
    }

    /// Create a new logging error with source.
    pub fn logging_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error was raised while validating configuration.
    pub const fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// The configuration field this error refers to, if any.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Wrap any displayable value as an [`UpdateError`].
///
/// Handy for updaters whose failures are plain strings.
pub fn update_error(msg: impl Into<String>) -> UpdateError {
    msg.into().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = BeaconError::invalid_config("name", "No name property provided for beacon");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: No name property provided for beacon"
        );
        assert!(err.is_invalid_config());
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_stopped_display() {
        let err = BeaconError::stopped("rates");
        assert_eq!(
            err.to_string(),
            "Beacon 'rates' stopped before its first refresh completed"
        );
        assert!(!err.is_invalid_config());
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_update_error_from_string() {
        let err = update_error("upstream timed out");
        assert_eq!(err.to_string(), "upstream timed out");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BeaconError = io.into();
        assert!(matches!(err, BeaconError::Io(_)));
    }
}
