//! Wires settings, the file source and a beacon into a request loop.

use crate::error::CliResult;
use crate::source::FileSource;
use beacon_common::truncate_string;
use beacon_config::Settings;
use beacon_core::{Beacon, Injector, RefreshStats, Response};
use std::future::Future;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Longest value excerpt written to the request log.
const LOG_EXCERPT_CHARS: usize = 60;

/// What a finished run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Requests served.
    pub served: u64,
    /// Refresh counters at shutdown.
    pub stats: RefreshStats,
    /// Value the last request saw.
    pub last_value: Option<String>,
}

/// The `beacon` application.
#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
    immediate: bool,
    max_requests: Option<u64>,
}

impl App {
    /// Creates an app that waits for the first refresh and serves until shut down.
    pub const fn new(settings: Settings) -> Self {
        Self {
            settings,
            immediate: false,
            max_requests: None,
        }
    }

    /// Serve requests right away, before the first refresh completes.
    #[must_use]
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Stop after `max` requests.
    #[must_use]
    pub fn max_requests(mut self, max: Option<u64>) -> Self {
        self.max_requests = max;
        self
    }

    /// Builds and starts the beacon in the configured mode.
    ///
    /// # Errors
    ///
    /// Fails when the beacon settings are invalid or, in gated mode, when
    /// the refresh task dies before its first cycle.
    pub async fn start(&self) -> CliResult<Beacon<String>> {
        let settings = &self.settings.beacon;
        let mut builder = Beacon::<String>::builder()
            .name(settings.name.as_str())
            .interval_ms(settings.interval_ms)
            .updater(FileSource::new(settings.source_path.clone()));
        if let Some(default_value) = &settings.default_value {
            builder = builder.default_value(default_value.clone());
        }
        let config = builder.build()?;

        if self.immediate {
            Ok(config.spawn())
        } else {
            info!(source = %settings.source_path.display(), "Waiting for first refresh");
            Ok(config.ready().await?)
        }
    }

    /// Runs until `shutdown` resolves or the request limit is reached,
    /// then stops the refresh loop.
    ///
    /// # Errors
    ///
    /// See [`App::start`].
    pub async fn run<S>(self, shutdown: S) -> CliResult<RunReport>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let beacon = tokio::select! {
            biased;
            beacon = self.start() => beacon?,
            () = &mut shutdown => {
                info!("Shutdown requested before the first refresh");
                return Ok(RunReport::default());
            }
        };
        let (injector, handle) = beacon.into_parts();

        let mut ticker = interval(self.settings.requests.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut report = RunReport::default();
        while self.max_requests.map_or(true, |max| report.served < max) {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => {}
            }

            report.served += 1;
            report.last_value = serve_request(&injector, report.served);
        }

        report.stats = handle.stats();
        handle.shutdown().await;
        Ok(report)
    }
}

/// Serves one simulated request and returns the value it saw.
pub fn serve_request(injector: &Injector<String>, request_id: u64) -> Option<String> {
    let mut res = Response::default();
    injector.handle(&request_id, &mut res, || ());

    let value = res.locals.get::<String>(injector.name()).cloned();
    match &value {
        Some(v) => info!(
            request = request_id,
            value = %truncate_string(v, LOG_EXCERPT_CHARS),
            "Request served"
        ),
        None => info!(request = request_id, "Request served before any value was available"),
    }
    value
}
