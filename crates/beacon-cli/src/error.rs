//! Application-wide error types using thiserror.

use beacon_common::BeaconError;
use beacon_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Settings could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The beacon failed to start or logging could not be set up.
    #[error("Beacon error: {0}")]
    Beacon(#[from] BeaconError),
}

/// Result type for the binary.
pub type CliResult<T> = Result<T, CliError>;
