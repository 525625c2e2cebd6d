//! Per-request accessor that copies the cached value into response locals.

use crate::cell::CacheCell;
use crate::locals::{HasLocals, Locals};
use std::fmt;
use std::sync::Arc;

/// Copies a beacon's current value into each request's locals.
///
/// Cloning is cheap; every clone reads the same cell.
pub struct Injector<T> {
    name: Arc<str>,
    cell: Arc<CacheCell<T>>,
}

impl<T> Clone for Injector<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Send + Sync + 'static> Injector<T> {
    pub(crate) fn new(name: Arc<str>, cell: Arc<CacheCell<T>>) -> Self {
        Self { name, cell }
    }

    /// The key this injector writes under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value requests would see right now.
    pub fn current(&self) -> Option<Arc<T>> {
        self.cell.load()
    }

    /// Writes the current value into `locals`, undefined if the cell is empty.
    pub fn inject(&self, locals: &mut Locals) {
        locals.insert(&*self.name, self.current());
    }

    /// Request hook: injects into `res`, then calls `next` and returns its output.
    ///
    /// `next` is always called exactly once, whatever state the cache is in.
    pub fn handle<Req, Res, N, O>(&self, _req: &Req, res: &mut Res, next: N) -> O
    where
        Req: ?Sized,
        Res: HasLocals + ?Sized,
        N: FnOnce() -> O,
    {
        self.inject(res.locals_mut());
        next()
    }
}

impl<T> fmt::Debug for Injector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of an injector, for holding injectors of different
/// value types side by side.
pub trait Inject: Send + Sync {
    /// The key this injector writes under.
    fn name(&self) -> &str;

    /// Writes the current value into `locals`.
    fn inject(&self, locals: &mut Locals);
}

impl<T: Send + Sync + 'static> Inject for Injector<T> {
    fn name(&self) -> &str {
        Self::name(self)
    }

    fn inject(&self, locals: &mut Locals) {
        Self::inject(self, locals);
    }
}

/// Runs every injector against `res`, then calls `next`.
pub fn inject_all<Res, N, O>(injectors: &[Arc<dyn Inject>], res: &mut Res, next: N) -> O
where
    Res: HasLocals + ?Sized,
    N: FnOnce() -> O,
{
    let locals = res.locals_mut();
    for injector in injectors {
        injector.inject(locals);
    }
    next()
}
