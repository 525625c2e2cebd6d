//! Refresh loop driving one beacon.
//!
//! The next updater call is scheduled `interval` after the previous value has
//! been stored, never at a fixed rate, so calls can't overlap and a slow
//! source simply stretches the cycle.

use crate::cell::CacheCell;
use crate::stats::RefreshStats;
use crate::transform::Transform;
use crate::updater::Updater;
use beacon_common::format_interval;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

/// Called once, right after the first cycle's value is stored.
pub(crate) type FirstCycleHook = Box<dyn FnOnce() + Send>;

pub(crate) struct Scheduler<T: Send + 'static> {
    name: Arc<str>,
    interval: Duration,
    updater: Arc<dyn Updater<T>>,
    transform: Arc<dyn Transform<T>>,
    cell: Arc<CacheCell<T>>,
    stats: Arc<RwLock<RefreshStats>>,
}

impl<T: Send + Sync + 'static> Scheduler<T> {
    pub(crate) fn new(
        name: Arc<str>,
        interval: Duration,
        updater: Arc<dyn Updater<T>>,
        transform: Arc<dyn Transform<T>>,
        cell: Arc<CacheCell<T>>,
    ) -> Self {
        Self {
            name,
            interval,
            updater,
            transform,
            cell,
            stats: Arc::new(RwLock::new(RefreshStats::default())),
        }
    }

    /// Runs one cycle: await the updater, transform the attempt, store it.
    pub(crate) async fn refresh_once(&self) {
        let attempt = self.updater.update().await;
        let failed = attempt.is_error();
        let previous = self.cell.load();
        let value = self.transform.apply(&self.name, previous.as_deref(), attempt);

        debug!(failed, cached = value.is_some(), "Refresh cycle completed");
        self.cell.store(value);
        self.stats.write().record(failed);
    }

    /// Starts the loop on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub(crate) fn spawn(self, on_first_cycle: Option<FirstCycleHook>) -> RefreshHandle {
        let token = CancellationToken::new();
        let name = Arc::clone(&self.name);
        let stats = Arc::clone(&self.stats);

        let span = info_span!("beacon", name = %self.name);
        let task = tokio::spawn(self.run(token.clone(), on_first_cycle).instrument(span));

        RefreshHandle {
            name,
            token,
            stats,
            task: Some(task),
        }
    }

    async fn run(self, token: CancellationToken, mut on_first_cycle: Option<FirstCycleHook>) {
        info!(interval = %format_interval(self.interval), "Refresh loop started");

        loop {
            self.refresh_once().await;

            if let Some(hook) = on_first_cycle.take() {
                hook();
            }

            tokio::select! {
                biased;
                () = token.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(cycles = self.stats.read().cycles, "Refresh loop stopped");
    }
}

/// Controls a running refresh loop.
///
/// Dropping the handle leaves the loop running for the life of the runtime;
/// call [`RefreshHandle::stop`] to end it.
pub struct RefreshHandle {
    name: Arc<str>,
    token: CancellationToken,
    stats: Arc<RwLock<RefreshStats>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Name of the beacon this loop refreshes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asks the loop to stop.
    ///
    /// An updater call already in flight is allowed to finish and its value
    /// is stored; no further call is made.
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            info!(beacon = %self.name, "Stopping refresh loop");
            self.token.cancel();
        }
    }

    /// Whether [`RefreshHandle::stop`] has been called.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Snapshot of the loop's refresh counters.
    pub fn stats(&self) -> RefreshStats {
        self.stats.read().clone()
    }

    /// Waits for the loop task to exit.
    ///
    /// Without a prior [`RefreshHandle::stop`] this only returns if the
    /// updater panicked.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(beacon = %self.name, error = %e, "Refresh loop ended abnormally");
            }
        }
    }

    /// Stops the loop and waits for it to exit.
    pub async fn shutdown(self) {
        self.stop();
        self.join().await;
    }
}

impl fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("name", &self.name)
            .field("stopped", &self.is_stopped())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
