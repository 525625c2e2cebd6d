//! Mapping of one refresh outcome to the value that gets cached.

use beacon_common::UpdateError;
use tracing::error;

/// The outcome of one updater invocation.
///
/// Both halves may be present at once: an updater can report a problem and
/// still hand back a (possibly degraded) result.
#[derive(Debug)]
pub struct RefreshAttempt<T> {
    /// Error reported by the updater, if any.
    pub error: Option<UpdateError>,
    /// Result produced by the updater, if any.
    pub result: Option<T>,
}

impl<T> RefreshAttempt<T> {
    /// A successful attempt carrying `result`.
    pub const fn ok(result: T) -> Self {
        Self {
            error: None,
            result: Some(result),
        }
    }

    /// A failed attempt with no result.
    pub fn err(error: impl Into<UpdateError>) -> Self {
        Self {
            error: Some(error.into()),
            result: None,
        }
    }

    /// A failed attempt that still carries a result.
    pub fn partial(error: impl Into<UpdateError>, result: T) -> Self {
        Self {
            error: Some(error.into()),
            result: Some(result),
        }
    }

    /// An attempt with neither error nor result.
    pub const fn empty() -> Self {
        Self {
            error: None,
            result: None,
        }
    }

    /// Whether the updater reported an error.
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Splits the attempt into its error and result.
    pub fn into_parts(self) -> (Option<UpdateError>, Option<T>) {
        (self.error, self.result)
    }
}

impl<T, E> From<Result<T, E>> for RefreshAttempt<T>
where
    E: Into<UpdateError>,
{
    fn from(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(result) => Self::ok(result),
            Err(e) => Self::err(e),
        }
    }
}

/// Receives updater errors reported by a transformer.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorSink: Send + Sync {
    /// Reports `error` raised while refreshing the beacon called `beacon`.
    fn report(&self, beacon: &str, error: &UpdateError);
}

/// Reports errors as `tracing` error events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, beacon: &str, error: &UpdateError) {
        error!(beacon = %beacon, error = %error, "Beacon updater reported an error");
    }
}

/// Turns a [`RefreshAttempt`] into the value to cache.
///
/// `previous` is what the cache holds when the attempt completes: the last
/// stored value, or the default before the first store. Returning `None`
/// clears the cache, so a transformer that wants to keep the old value on
/// error returns a clone of `previous` (see [`KeepLastGood`]).
/// Plain closures `Fn(RefreshAttempt<T>) -> Option<T>` implement this trait
/// and ignore `previous`.
pub trait Transform<T>: Send + Sync {
    /// Maps one attempt of the beacon called `beacon` to the value to cache.
    fn apply(&self, beacon: &str, previous: Option<&T>, attempt: RefreshAttempt<T>) -> Option<T>;
}

impl<T, F> Transform<T> for F
where
    F: Fn(RefreshAttempt<T>) -> Option<T> + Send + Sync,
{
    fn apply(&self, _beacon: &str, _previous: Option<&T>, attempt: RefreshAttempt<T>) -> Option<T> {
        self(attempt)
    }
}

/// Default transformer: reports the error, if any, and caches the result as is.
///
/// An errored attempt still overwrites the cache with whatever result it
/// carried, including nothing.
#[derive(Debug, Default, Clone)]
pub struct LogAndPassthrough<S = TracingSink> {
    sink: S,
}

impl LogAndPassthrough {
    /// Creates the transformer, reporting through `tracing`.
    pub const fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: ErrorSink> LogAndPassthrough<S> {
    /// Uses `sink` instead of the tracing sink.
    pub const fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// The sink errors are reported to.
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<T, S: ErrorSink> Transform<T> for LogAndPassthrough<S> {
    fn apply(&self, beacon: &str, _previous: Option<&T>, attempt: RefreshAttempt<T>) -> Option<T> {
        if let Some(error) = &attempt.error {
            self.sink.report(beacon, error);
        }
        attempt.result
    }
}

/// Reports errors and keeps serving the cached value instead.
///
/// Before the first successful refresh the cached value is the beacon's
/// default, so a failing first attempt leaves the default in place.
#[derive(Debug, Default, Clone)]
pub struct KeepLastGood<S = TracingSink> {
    sink: S,
}

impl KeepLastGood {
    /// Creates the transformer, reporting through `tracing`.
    pub const fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: ErrorSink> KeepLastGood<S> {
    /// Creates the transformer with a custom error sink.
    pub const fn with_sink(sink: S) -> Self {
        Self { sink }
    }
}

impl<T: Clone, S: ErrorSink> Transform<T> for KeepLastGood<S> {
    fn apply(&self, beacon: &str, previous: Option<&T>, attempt: RefreshAttempt<T>) -> Option<T> {
        match attempt.error {
            Some(error) => {
                self.sink.report(beacon, &error);
                previous.cloned()
            }
            None => attempt.result,
        }
    }
}
