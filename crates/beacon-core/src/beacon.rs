//! Beacon construction: validated configuration and the two startup modes.
//!
//! - [`BeaconConfig::spawn`] returns the injector right away; early requests
//!   may see the default value.
//! - [`BeaconConfig::spawn_gated`] and [`BeaconConfig::ready`] hand out the
//!   injector only after the first refresh cycle has been stored.
//!
//! Both modes then keep refreshing on the same loop.

use crate::cell::CacheCell;
use crate::injector::Injector;
use crate::scheduler::{RefreshHandle, Scheduler};
use crate::transform::{LogAndPassthrough, RefreshAttempt, Transform};
use crate::updater::{updater_fn, Updater};
use beacon_common::{format_interval, BeaconError, Result};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

/// Delay between cycles when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(60_000);

type ReadyCallback<T> = Box<dyn FnOnce(Injector<T>) + Send>;

/// A running beacon: its injector plus the handle of its refresh loop.
pub struct Beacon<T> {
    injector: Injector<T>,
    handle: RefreshHandle,
}

impl<T: Send + Sync + 'static> Beacon<T> {
    /// Starts building a beacon.
    pub fn builder() -> BeaconBuilder<T> {
        BeaconBuilder::new()
    }

    /// The per-request accessor.
    pub const fn injector(&self) -> &Injector<T> {
        &self.injector
    }

    /// The refresh loop handle.
    pub const fn handle(&self) -> &RefreshHandle {
        &self.handle
    }

    /// The currently cached value.
    pub fn current(&self) -> Option<Arc<T>> {
        self.injector.current()
    }

    /// Splits into injector and handle.
    pub fn into_parts(self) -> (Injector<T>, RefreshHandle) {
        (self.injector, self.handle)
    }
}

impl<T> fmt::Debug for Beacon<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Beacon")
            .field("injector", &self.injector)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Collects beacon settings; [`BeaconBuilder::build`] validates them.
pub struct BeaconBuilder<T: Send + 'static> {
    name: Option<String>,
    default_value: Option<T>,
    interval: Option<Duration>,
    updater: Option<Arc<dyn Updater<T>>>,
    transform: Option<Arc<dyn Transform<T>>>,
}

impl<T: Send + Sync + 'static> BeaconBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            name: None,
            default_value: None,
            interval: None,
            updater: None,
            transform: None,
        }
    }

    /// Key the value is exposed under in request locals. Required.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Value served until the first refresh completes.
    #[must_use]
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Delay between the end of one cycle and the start of the next.
    ///
    /// A zero interval falls back to [`DEFAULT_INTERVAL`].
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Same as [`BeaconBuilder::interval`], in milliseconds.
    #[must_use]
    pub fn interval_ms(self, millis: u64) -> Self {
        self.interval(Duration::from_millis(millis))
    }

    /// Data source polled every cycle. Required.
    #[must_use]
    pub fn updater(mut self, updater: impl Updater<T> + 'static) -> Self {
        self.updater = Some(Arc::new(updater));
        self
    }

    /// Data source given as an async closure. Required unless
    /// [`BeaconBuilder::updater`] is used.
    #[must_use]
    pub fn updater_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RefreshAttempt<T>> + Send + 'static,
    {
        self.updater(updater_fn(f))
    }

    /// Maps each attempt to the cached value. Defaults to [`LogAndPassthrough`].
    #[must_use]
    pub fn transform(mut self, transform: impl Transform<T> + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::InvalidConfig`] when the updater or the name is
    /// missing (checked in that order). A blank name counts as missing.
    pub fn build(self) -> Result<BeaconConfig<T>> {
        let updater = self.updater.ok_or_else(|| {
            BeaconError::invalid_config("updater", "No updater function provided for beacon")
        })?;

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(BeaconError::invalid_config(
                    "name",
                    "No name property provided for beacon",
                ))
            }
        };

        let interval = match self.interval {
            Some(interval) if !interval.is_zero() => interval,
            _ => DEFAULT_INTERVAL,
        };

        let transform = self
            .transform
            .unwrap_or_else(|| Arc::new(LogAndPassthrough::new()));

        debug!(
            beacon = %name,
            interval = %format_interval(interval),
            has_default = self.default_value.is_some(),
            "Beacon configuration validated"
        );

        Ok(BeaconConfig {
            name: Arc::from(name),
            default_value: self.default_value,
            interval,
            updater,
            transform,
        })
    }
}

impl<T: Send + Sync + 'static> Default for BeaconBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated, immutable beacon settings, ready to start.
pub struct BeaconConfig<T: Send + 'static> {
    name: Arc<str>,
    default_value: Option<T>,
    interval: Duration,
    updater: Arc<dyn Updater<T>>,
    transform: Arc<dyn Transform<T>>,
}

impl<T: Send + Sync + 'static> BeaconConfig<T> {
    /// Key the value is exposed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delay between cycles.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts refreshing in the background and returns immediately.
    ///
    /// Until the first cycle completes, the injector serves the default
    /// value, or an undefined entry when there is none.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(self) -> Beacon<T> {
        let (injector, handle) = self.launch(None);
        Beacon { injector, handle }
    }

    /// Runs the first cycle, then calls `on_ready` with the injector.
    ///
    /// `on_ready` fires exactly once, on the refresh task, after the first
    /// value is stored; the loop continues afterwards. Keep it short.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn_gated<F>(self, on_ready: F) -> RefreshHandle
    where
        F: FnOnce(Injector<T>) + Send + 'static,
    {
        self.launch(Some(Box::new(on_ready))).1
    }

    /// Async form of [`BeaconConfig::spawn_gated`].
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::Stopped`] if the refresh task died before
    /// finishing its first cycle.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn ready(self) -> Result<Beacon<T>> {
        let name = Arc::clone(&self.name);
        let (tx, rx) = oneshot::channel();

        let handle = self.spawn_gated(move |injector| {
            let _ = tx.send(injector);
        });

        rx.await
            .map(|injector| Beacon { injector, handle })
            .map_err(|_| BeaconError::stopped(&*name))
    }

    fn launch(self, on_ready: Option<ReadyCallback<T>>) -> (Injector<T>, RefreshHandle) {
        let cell = Arc::new(CacheCell::new(self.default_value));
        let injector = Injector::new(Arc::clone(&self.name), Arc::clone(&cell));

        let on_first_cycle = on_ready.map(|callback| {
            let ready_injector = injector.clone();
            Box::new(move || callback(ready_injector)) as Box<dyn FnOnce() + Send>
        });

        let scheduler = Scheduler::new(self.name, self.interval, self.updater, self.transform, cell);
        let handle = scheduler.spawn(on_first_cycle);

        (injector, handle)
    }
}

impl<T: Send + 'static> fmt::Debug for BeaconConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeaconConfig")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("has_default", &self.default_value.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_updater() -> impl Updater<&'static str> {
        updater_fn(|| async { RefreshAttempt::ok("fresh") })
    }

    #[test]
    fn test_missing_updater_fails_first() {
        let err = Beacon::<&str>::builder().name("").build().unwrap_err();
        assert_eq!(err.field(), Some("updater"));
        assert!(err.to_string().contains("No updater function provided for beacon"));
    }

    #[test]
    fn test_missing_name_fails() {
        let err = Beacon::<&str>::builder().updater(ok_updater()).build().unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert!(err.to_string().contains("No name property provided for beacon"));
    }

    #[test]
    fn test_blank_name_fails() {
        let err = Beacon::<&str>::builder()
            .name("   ")
            .updater(ok_updater())
            .build()
            .unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_interval_defaults() {
        let config = Beacon::<&str>::builder()
            .name("k")
            .updater(ok_updater())
            .build()
            .unwrap();
        assert_eq!(config.interval(), DEFAULT_INTERVAL);
        assert_eq!(config.name(), "k");

        let zero = Beacon::<&str>::builder()
            .name("k")
            .interval(Duration::ZERO)
            .updater(ok_updater())
            .build()
            .unwrap();
        assert_eq!(zero.interval(), DEFAULT_INTERVAL);

        let custom = Beacon::<&str>::builder()
            .name("k")
            .interval_ms(50)
            .updater(ok_updater())
            .build()
            .unwrap();
        assert_eq!(custom.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_build_does_not_need_runtime() {
        // Validation happens before anything is spawned.
        let config = Beacon::builder()
            .name("k")
            .default_value("warm")
            .updater(ok_updater())
            .build();
        assert!(config.is_ok());
    }

    #[tokio::test]
    async fn test_ready_serves_fetched_value() {
        let beacon = Beacon::builder()
            .name("k")
            .default_value("stale")
            .updater(ok_updater())
            .build()
            .unwrap()
            .ready()
            .await
            .unwrap();

        assert_eq!(beacon.current().as_deref(), Some(&"fresh"));
        assert_eq!(beacon.handle().stats().cycles, 1);
        beacon.handle().stop();
    }
}
