#![forbid(unsafe_code)]

//! Explicit capability scopes.
//!
//! A [`Scope`] is a parent-linked registry of cell capabilities keyed by
//! value type. It is passed by parameter at composition time; there is no
//! global or thread-local lookup. Resolution walks from the asking scope
//! toward the root and returns the nearest provider, so an inner provider
//! shadows an outer one for the same value type.

use std::any::{Any, type_name};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cell::{CellHandle, CellReader};
use crate::error::{Error, Result};

struct ScopeInner {
    name: String,
    parent: Option<Rc<ScopeInner>>,
    provided: RefCell<Vec<Box<dyn Any>>>,
}

impl ScopeInner {
    fn find<T: Clone + 'static>(&self) -> Option<CellHandle<T>> {
        self.provided
            .borrow()
            .iter()
            .find_map(|any| any.downcast_ref::<CellHandle<T>>())
            .cloned()
    }

    fn path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}/{}", parent.path(), self.name),
            None => self.name.clone(),
        }
    }
}

/// Cheaply cloneable handle to a scope node.
#[derive(Clone)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

impl Scope {
    /// A scope with no parent, named `root`.
    #[must_use]
    pub fn root() -> Self {
        Self::named("root")
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                name: name.into(),
                parent: None,
                provided: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Derive a nested scope that falls back to `self` for lookups.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                name: name.into(),
                parent: Some(Rc::clone(&self.inner)),
                provided: RefCell::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Slash-separated names from the root to this scope.
    #[must_use]
    pub fn path(&self) -> String {
        self.inner.path()
    }

    /// Offer `handle` to this scope and its descendants. Providing the same
    /// value type twice on one scope replaces the earlier handle.
    pub fn provide<T: Clone + 'static>(&self, handle: CellHandle<T>) -> &Self {
        let mut value: Box<dyn Any> = Box::new(handle);
        let mut provided = self.inner.provided.borrow_mut();
        for slot in provided.iter_mut() {
            if slot.is::<CellHandle<T>>() {
                std::mem::swap(slot, &mut value);
                return self;
            }
        }
        provided.push(value);
        self
    }

    /// Whether this scope itself (ignoring ancestors) provides `T`.
    #[must_use]
    pub fn provides<T: Clone + 'static>(&self) -> bool {
        self.inner.find::<T>().is_some()
    }

    /// Resolve the nearest read + write capability for `T`.
    pub fn consume<T: Clone + 'static>(&self) -> Result<CellHandle<T>> {
        let mut current = Some(&self.inner);
        while let Some(scope) = current {
            tracing::trace!(
                message = "scope.lookup",
                value = type_name::<T>(),
                scope = scope.name.as_str()
            );
            if let Some(handle) = scope.find::<T>() {
                if !handle.is_live() {
                    return Err(Error::provider_gone::<T>());
                }
                return Ok(handle);
            }
            current = scope.parent.as_ref();
        }
        Err(Error::missing_provider::<T>(self.path()))
    }

    /// Resolve the nearest read-only capability for `T`.
    pub fn consume_reader<T: Clone + 'static>(&self) -> Result<CellReader<T>> {
        self.consume::<T>().map(|handle| handle.reader())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("path", &self.path())
            .field("provided", &self.inner.provided.borrow().len())
            .finish()
    }
}
