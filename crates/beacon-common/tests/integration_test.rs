//! Integration tests for beacon-common crate.

use chrono::{TimeZone, Utc};
use std::time::Duration;
use beacon_common::{
    format_interval, format_timestamp, truncate_string, update_error, BeaconError, UpdateError,
};

#[test]
fn test_format_timestamp() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let formatted = format_timestamp(timestamp);
    assert_eq!(formatted, "2024-01-01 12:00:00 UTC");
}

#[test]
fn test_format_default_interval() {
    assert_eq!(format_interval(Duration::from_millis(60_000)), "1m");
}

#[test]
fn test_truncate_string() {
    let truncated = truncate_string("abcdefghij", 6);
    assert_eq!(truncated, "abc...");
}

#[test]
fn test_update_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let err: UpdateError = update_error("boom");
    assert_send_sync(&err);
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_invalid_config_error_reports_field() {
    let err = BeaconError::invalid_config("updater", "No updater function provided for beacon");
    assert!(err.is_invalid_config());
    assert_eq!(err.field(), Some("updater"));
    assert!(err.to_string().contains("No updater function provided"));
}
