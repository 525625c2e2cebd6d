//! Settings loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for settings operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading, parsing or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported settings format '{extension}' (expected toml, yaml, yml or json)")]
    UnsupportedFormat {
        /// The offending extension, empty when the path has none.
        extension: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("Failed to parse JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse {
        /// Variable name.
        var: &'static str,
        /// Parse failure description.
        message: String,
    },

    /// A setting failed validation.
    #[error("Invalid setting '{field}': {message}")]
    Invalid {
        /// Dotted path of the setting.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }

    /// The setting a validation error refers to.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<ConfigError> for beacon_common::BeaconError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid { field, message } => Self::invalid_config(field, message),
            other => Self::invalid_config("settings", other.to_string()),
        }
    }
}
