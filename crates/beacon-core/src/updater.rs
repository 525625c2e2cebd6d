//! Data source abstraction polled by the scheduler.

use crate::transform::RefreshAttempt;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// An asynchronous source of fresh values.
///
/// The scheduler awaits one call at a time; a call that never completes
/// stalls the beacon without affecting readers.
#[async_trait]
pub trait Updater<T: Send + 'static>: Send + Sync {
    /// Fetches a fresh value, reporting problems inside the attempt.
    async fn update(&self) -> RefreshAttempt<T>;
}

#[async_trait]
impl<T, U> Updater<T> for Arc<U>
where
    T: Send + 'static,
    U: Updater<T> + ?Sized,
{
    async fn update(&self) -> RefreshAttempt<T> {
        (**self).update().await
    }
}

/// Adapts an async closure into an [`Updater`].
#[derive(Clone)]
pub struct FnUpdater<F> {
    f: F,
}

/// Wraps `f` so it can be polled as an [`Updater`].
pub const fn updater_fn<F>(f: F) -> FnUpdater<F> {
    FnUpdater { f }
}

#[async_trait]
impl<T, F, Fut> Updater<T> for FnUpdater<F>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = RefreshAttempt<T>> + Send + 'static,
{
    async fn update(&self) -> RefreshAttempt<T> {
        (self.f)().await
    }
}

impl<F> std::fmt::Debug for FnUpdater<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnUpdater").finish_non_exhaustive()
    }
}
