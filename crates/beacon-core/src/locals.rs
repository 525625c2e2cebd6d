//! Per-request output context that injectors write into.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Slot = Option<Arc<dyn Any + Send + Sync>>;

/// Name-keyed values attached to one response.
///
/// An entry can be present but undefined, which is what an injector writes
/// while its beacon has neither a default nor a fetched value.
#[derive(Clone, Default)]
pub struct Locals {
    entries: HashMap<String, Slot>,
}

impl Locals {
    /// Creates an empty set of locals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous entry.
    pub fn insert<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: Option<Arc<T>>) {
        let slot: Slot = value.map(|v| v as Arc<dyn Any + Send + Sync>);
        self.entries.insert(name.into(), slot);
    }

    /// Borrows the value at `name` if it is defined and of type `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.entries.get(name)?.as_deref()?.downcast_ref::<T>()
    }

    /// Clones out the shared value at `name` if it is defined and of type `T`.
    pub fn get_arc<T: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<T>> {
        let slot = self.entries.get(name)?.clone()?;
        slot.downcast::<T>().ok()
    }

    /// Whether an entry exists at `name`, defined or not.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether an entry exists at `name` but holds no value.
    pub fn is_undefined(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(None))
    }

    /// Removes the entry at `name`, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Iterates over entry names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Locals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, slot) in &self.entries {
            let state = if slot.is_some() { "<defined>" } else { "<undefined>" };
            map.entry(name, &state);
        }
        map.finish()
    }
}

/// Anything that carries [`Locals`] an injector can write into.
pub trait HasLocals {
    /// Mutable access to the locals.
    fn locals_mut(&mut self) -> &mut Locals;
}

impl HasLocals for Locals {
    fn locals_mut(&mut self) -> &mut Locals {
        self
    }
}

/// Minimal response context for transports without their own.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Values injected for this response.
    pub locals: Locals,
}

impl HasLocals for Response {
    fn locals_mut(&mut self) -> &mut Locals {
        &mut self.locals
    }
}
