//! Integration tests for the beacon binary's library half.
//!
//! These drive a real file through the refresh loop and check what
//! simulated requests see.

use beacon_cli::{serve_request, App, FileSource};
use beacon_config::Settings;
use beacon_core::Beacon;
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[cfg(feature = "testing")]
use beacon_common::test_utils::init_test_logging;

fn setup() {
    #[cfg(feature = "testing")]
    init_test_logging();
}

#[tokio::test]
async fn test_file_changes_reach_requests() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.txt");
    tokio::fs::write(&path, "first\n").await.unwrap();

    let beacon = Beacon::<String>::builder()
        .name("motd")
        .interval_ms(20)
        .updater(FileSource::new(&path))
        .build()
        .unwrap()
        .ready()
        .await
        .unwrap();
    assert_eq!(serve_request(beacon.injector(), 1).as_deref(), Some("first"));

    tokio::fs::write(&path, "second\n").await.unwrap();
    let injector = beacon.injector().clone();
    let seen = timeout(Duration::from_secs(2), async move {
        loop {
            if let Some(value) = serve_request(&injector, 2) {
                if value == "second" {
                    return value;
                }
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(seen, "second");

    beacon.into_parts().1.shutdown().await;
}

#[tokio::test]
async fn test_immediate_mode_serves_default_while_source_is_missing() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let beacon = Beacon::<String>::builder()
        .name("motd")
        .default_value("warming up".to_string())
        .interval_ms(20)
        .updater(FileSource::new(&path))
        .build()
        .unwrap()
        .spawn();

    // Before the first cycle the default is served.
    assert_eq!(
        serve_request(beacon.injector(), 1).as_deref(),
        Some("warming up")
    );

    // A failed read carries no result, so the entry becomes undefined.
    sleep(Duration::from_millis(50)).await;
    assert_eq!(serve_request(beacon.injector(), 2), None);
    assert!(beacon.handle().stats().errors >= 1);

    beacon.into_parts().1.shutdown().await;
}

#[tokio::test]
async fn test_app_run_honours_request_limit() {
    setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.txt");
    tokio::fs::write(&path, "hello").await.unwrap();

    let mut settings = Settings::default();
    settings.beacon.name = "motd".to_string();
    settings.beacon.source_path = path;
    settings.requests.every_ms = 5;

    let report = App::new(settings)
        .max_requests(Some(4))
        .run(std::future::pending())
        .await
        .unwrap();

    assert_eq!(report.served, 4);
    assert_eq!(report.last_value.as_deref(), Some("hello"));
    assert_eq!(report.stats.cycles, 1);
}
