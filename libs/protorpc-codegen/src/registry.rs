//! Backend registry
//!
//! Ordered list of code generation backends, populated once at start-up by
//! explicit `register` calls and read-only afterwards. Registration order is
//! significant: `first` is the default selection, and name lookup returns
//! the first match when names are duplicated.

use crate::backends::Backend;
use crate::error::{Error, Result};

#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a backend. Duplicate names are accepted; later duplicates are
    /// unreachable through `lookup`.
    pub fn register<B: Backend + 'static>(&mut self, backend: B) {
        self.backends.push(Box::new(backend));
    }

    /// All backends in registration order
    pub fn all(&self) -> impl Iterator<Item = &dyn Backend> {
        self.backends.iter().map(|b| b.as_ref() as &dyn Backend)
    }

    /// Backend names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.all().map(|b| b.name()).collect()
    }

    /// The first registered backend, if any
    pub fn first(&self) -> Option<&dyn Backend> {
        self.backends.first().map(|b| b.as_ref() as &dyn Backend)
    }

    /// First backend whose name equals `name`
    pub fn lookup(&self, name: &str) -> Option<&dyn Backend> {
        self.all().find(|b| b.name() == name)
    }

    /// Resolve the backend for a run: the named one, or the first registered
    /// when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&dyn Backend> {
        match name {
            Some(name) => self.lookup(name).ok_or_else(|| Error::UnknownBackend {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            }),
            None => self.first().ok_or(Error::NoBackends),
        }
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
