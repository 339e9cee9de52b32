#![forbid(unsafe_code)]

//! Lazy derived values that track [`SharedCell`](crate::SharedCell) sources.
//!
//! # Design
//!
//! [`Computed<T>`] wraps a compute function and its cached result in shared,
//! reference-counted storage. Each source notification marks the cache dirty.
//! The next [`get()`](Computed::get) recomputes and caches the result.
//!
//! # Invariants
//!
//! 1. `get()` is consistent with the current state of every source once the
//!    triggering write has returned.
//! 2. The compute function runs at most once per change cycle.
//! 3. Version increments by exactly 1 per recomputation.
//!
//! # Failure Modes
//!
//! - **Source provider unmounted**: the compute function reads through
//!   [`CellReader`]s, so `get()` returns [`Error::ProviderGone`](crate::Error)
//!   and the cache stays dirty.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::cell::{CellReader, Subscription};
use crate::error::Result;

type ComputeFn<T> = Box<dyn Fn() -> Result<T>>;

struct ComputedInner<T> {
    compute: ComputeFn<T>,
    cached: Option<T>,
    dirty: Cell<bool>,
    version: u64,
    _subscriptions: Vec<Subscription>,
}

/// A lazily-evaluated, memoized value derived from one or more cells.
///
/// Cloning a `Computed` creates a new handle to the **same** inner state.
pub struct Computed<T> {
    inner: Rc<RefCell<ComputedInner<T>>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Computed")
            .field("cached", &inner.cached)
            .field("dirty", &inner.dirty.get())
            .field("version", &inner.version)
            .finish()
    }
}

fn mark_dirty_on<S, T>(
    source: &CellReader<S>,
    inner: &Rc<RefCell<ComputedInner<T>>>,
) -> Result<Subscription>
where
    S: Clone + 'static,
    T: 'static,
{
    let weak = Rc::downgrade(inner);
    source.subscribe(move |_| {
        if let Some(strong) = weak.upgrade() {
            strong.borrow().dirty.set(true);
        }
    })
}

impl<T: Clone + 'static> Computed<T> {
    /// Derive a value from a single cell.
    pub fn from_reader<S: Clone + 'static>(
        source: &CellReader<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Result<Self> {
        let source_clone = source.clone();
        let computed = Self::from_fn(move || source_clone.with(|v| map(v)), Vec::new());
        let sub = mark_dirty_on(source, &computed.inner)?;
        computed.inner.borrow_mut()._subscriptions.push(sub);
        Ok(computed)
    }

    /// Derive a value from two cells.
    pub fn from2<S1, S2>(
        s1: &CellReader<S1>,
        s2: &CellReader<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Result<Self>
    where
        S1: Clone + 'static,
        S2: Clone + 'static,
    {
        let s1_clone = s1.clone();
        let s2_clone = s2.clone();
        let computed = Self::from_fn(
            move || {
                let v1 = s1_clone.read()?;
                s2_clone.with(|v2| map(&v1, v2))
            },
            Vec::new(),
        );
        let sub1 = mark_dirty_on(s1, &computed.inner)?;
        let sub2 = mark_dirty_on(s2, &computed.inner)?;
        {
            let mut inner = computed.inner.borrow_mut();
            inner._subscriptions.push(sub1);
            inner._subscriptions.push(sub2);
        }
        Ok(computed)
    }

    /// Low-level constructor: the caller wires its own subscriptions and
    /// calls [`invalidate`](Self::invalidate) as needed.
    pub fn from_fn(
        compute: impl Fn() -> Result<T> + 'static,
        subscriptions: Vec<Subscription>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ComputedInner {
                compute: Box::new(compute),
                cached: None,
                dirty: Cell::new(true),
                version: 0,
                _subscriptions: subscriptions,
            })),
        }
    }

    fn refresh(&self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.dirty.get() || inner.cached.is_none() {
            let value = (inner.compute)()?;
            inner.cached = Some(value);
            inner.dirty.set(false);
            inner.version += 1;
        }
        Ok(())
    }

    /// Current value, recomputed first if any source changed.
    pub fn get(&self) -> Result<T> {
        self.with(T::clone)
    }

    /// Access the current value by reference, recomputing first if dirty.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.refresh()?;
        let inner = self.inner.borrow();
        match inner.cached.as_ref() {
            Some(value) => Ok(f(value)),
            None => unreachable!("refresh leaves a cached value"),
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty.get()
    }

    pub fn invalidate(&self) {
        self.inner.borrow().dirty.set(true);
    }

    /// Increments by 1 on each recomputation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::SharedCell;
    use crate::error::Error;

    #[test]
    fn single_source() {
        let source = SharedCell::new(10);
        let doubled = Computed::from_reader(&source.reader(), |v| v * 2).expect("live");

        assert!(doubled.is_dirty());
        assert_eq!(doubled.get(), Ok(20));
        assert_eq!(doubled.version(), 1);

        source.write(5);
        assert!(doubled.is_dirty());
        assert_eq!(doubled.get(), Ok(10));
        assert_eq!(doubled.version(), 2);
    }

    #[test]
    fn two_sources() {
        let name = SharedCell::new(Some("Duane".to_string()));
        let theme = SharedCell::new("dark");
        let status = Computed::from2(&name.reader(), &theme.reader(), |n, t| {
            format!("{} / {t}", n.as_deref().unwrap_or("guest"))
        })
        .expect("live");

        assert_eq!(status.get().as_deref(), Ok("Duane / dark"));
        theme.write("light");
        assert_eq!(status.get().as_deref(), Ok("Duane / light"));
        name.write(None);
        assert_eq!(status.get().as_deref(), Ok("guest / light"));
    }

    #[test]
    fn memoizes_between_changes() {
        let runs = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&runs);
        let source = SharedCell::new(3);
        let computed = Computed::from_reader(&source.reader(), move |v| {
            counter.set(counter.get() + 1);
            *v
        })
        .expect("live");

        let _ = computed.get();
        let _ = computed.get();
        assert_eq!(runs.get(), 1);

        source.write(4);
        let _ = computed.get();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let source = SharedCell::new(1);
        let computed = Computed::from_reader(&source.reader(), |v| *v).expect("live");
        let _ = computed.get();
        computed.invalidate();
        assert!(computed.is_dirty());
        let _ = computed.get();
        assert_eq!(computed.version(), 2);
    }

    #[test]
    fn clone_shares_state() {
        let source = SharedCell::new(1);
        let a = Computed::from_reader(&source.reader(), |v| v + 1).expect("live");
        let b = a.clone();
        assert_eq!(b.get(), Ok(2));
        source.write(10);
        assert!(b.is_dirty());
        assert_eq!(a.get(), Ok(11));
        assert!(!b.is_dirty());
        assert_eq!(b.version(), 2);
    }

    #[test]
    fn source_gone_is_an_error() {
        let source = SharedCell::new(1u8);
        let computed = Computed::from_reader(&source.reader(), |v| *v).expect("live");
        assert_eq!(computed.get(), Ok(1));
        drop(source);
        computed.invalidate();
        assert!(matches!(computed.get(), Err(Error::ProviderGone { .. })));
        assert!(computed.is_dirty());
    }

    #[test]
    fn subscribing_to_dead_source_fails() {
        let source = SharedCell::new(0);
        let reader = source.reader();
        drop(source);
        assert!(Computed::from_reader(&reader, |v: &i32| *v).is_err());
    }
}
