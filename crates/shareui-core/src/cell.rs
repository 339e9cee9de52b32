#![forbid(unsafe_code)]

//! Observable value slot with synchronous change notification.
//!
//! [`SharedCell<T>`] owns a value and an ordered list of listeners. Every
//! [`write`](SharedCell::write) replaces the value, bumps the version, and
//! invokes each registered listener with the new value before returning.
//!
//! # Capabilities
//!
//! The owner hands out two kinds of borrowed capability:
//!
//! - [`CellHandle<T>`]: read + write.
//! - [`CellReader<T>`]: read only.
//!
//! Both hold a `Weak` reference. Once the owning cell is dropped every
//! operation on them returns [`Error::ProviderGone`] instead of silently
//! reading stale state.
//!
//! # Invariants
//!
//! 1. Listeners run in registration order, once per write.
//! 2. Version increments exactly once per write or update.
//! 3. A panicking listener does not stop later listeners; it is counted in
//!    the returned [`Notification`].
//! 4. No `RefCell` borrow is held while listeners run, so a listener may
//!    read, write, subscribe, or unsubscribe re-entrantly.
//! 5. A listener unsubscribed mid-cycle is skipped for the rest of that cycle.
//! 6. A write made by a listener ends the outer cycle once its own cycle
//!    returns, so every listener's last observed value is the current one.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    fn next() -> Self {
        Self(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// Outcome of one notification cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notification {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that panicked.
    pub failed: usize,
}

impl Notification {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

struct Listener<T> {
    id: u64,
    active: Cell<bool>,
    callback: Box<dyn Fn(&T)>,
}

struct CellInner<T> {
    id: CellId,
    value: T,
    version: u64,
    next_listener: u64,
    listeners: Vec<Rc<Listener<T>>>,
}

type Shared<T> = Rc<RefCell<CellInner<T>>>;

/// Owning side of an observable value.
///
/// Not `Clone`: exactly one owner exists. Hand out [`CellHandle`] or
/// [`CellReader`] to consumers instead.
pub struct SharedCell<T> {
    inner: Shared<T>,
}

impl<T: fmt::Debug> fmt::Debug for SharedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SharedCell")
            .field("id", &inner.id)
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + 'static> SharedCell<T> {
    /// Allocate a cell holding `initial`. No listeners, version 0.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CellInner {
                id: CellId::next(),
                value: initial,
                version: 0,
                next_listener: 0,
                listeners: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn id(&self) -> CellId {
        self.inner.borrow().id
    }

    /// Clone of the current value.
    #[must_use]
    pub fn read(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this same cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every listener.
    pub fn write(&self, value: T) -> Notification {
        write_inner(&self.inner, value)
    }

    /// Mutate the value in place and notify every listener.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> Notification {
        update_inner(&self.inner, f)
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        subscribe_inner(&self.inner, listener)
    }

    /// Number of writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.active.get())
            .count()
    }

    /// Read + write capability bound to this cell.
    #[must_use]
    pub fn handle(&self) -> CellHandle<T> {
        CellHandle {
            inner: Rc::downgrade(&self.inner),
            id: self.id(),
        }
    }

    /// Read-only capability bound to this cell.
    #[must_use]
    pub fn reader(&self) -> CellReader<T> {
        self.handle().reader()
    }
}

fn write_inner<T: Clone + 'static>(inner: &Shared<T>, value: T) -> Notification {
    {
        let mut guard = inner.borrow_mut();
        guard.value = value;
        guard.version += 1;
    }
    notify(inner)
}

fn update_inner<T: Clone + 'static>(inner: &Shared<T>, f: impl FnOnce(&mut T)) -> Notification {
    {
        let mut guard = inner.borrow_mut();
        f(&mut guard.value);
        guard.version += 1;
    }
    notify(inner)
}

fn notify<T: Clone + 'static>(inner: &Shared<T>) -> Notification {
    let (id, version, snapshot, listeners) = {
        let guard = inner.borrow();
        (
            guard.id,
            guard.version,
            guard.value.clone(),
            guard.listeners.clone(),
        )
    };

    let mut report = Notification::default();
    for listener in &listeners {
        if !listener.active.get() {
            continue;
        }
        match catch_unwind(AssertUnwindSafe(|| (listener.callback)(&snapshot))) {
            Ok(()) => report.delivered += 1,
            Err(_) => {
                report.failed += 1;
                tracing::warn!(
                    message = "cell.listener_panicked",
                    cell = id.get(),
                    listener = listener.id,
                    version
                );
            }
        }
        // A listener wrote again; the nested cycle already delivered the newer value.
        if inner.try_borrow().is_ok_and(|guard| guard.version != version) {
            tracing::debug!(message = "cell.superseded", cell = id.get(), version);
            break;
        }
    }

    // Drop entries whose cancel ran while the cell was borrowed.
    if let Ok(mut guard) = inner.try_borrow_mut() {
        guard.listeners.retain(|l| l.active.get());
    }

    tracing::debug!(
        message = "cell.write",
        cell = id.get(),
        version,
        delivered = report.delivered,
        failed = report.failed
    );
    report
}

fn subscribe_inner<T: 'static>(inner: &Shared<T>, listener: impl Fn(&T) + 'static) -> Subscription {
    let (cell, entry) = {
        let mut guard = inner.borrow_mut();
        let id = guard.next_listener;
        guard.next_listener += 1;
        let entry = Rc::new(Listener {
            id,
            active: Cell::new(true),
            callback: Box::new(listener),
        });
        guard.listeners.push(Rc::clone(&entry));
        (guard.id, entry)
    };

    let weak_cell: Weak<RefCell<CellInner<T>>> = Rc::downgrade(inner);
    let weak_entry = Rc::downgrade(&entry);
    let listener_id = entry.id;
    Subscription {
        cell,
        cancel: RefCell::new(Some(Box::new(move || {
            if let Some(entry) = weak_entry.upgrade() {
                entry.active.set(false);
            }
            if let Some(cell) = weak_cell.upgrade()
                && let Ok(mut guard) = cell.try_borrow_mut()
            {
                guard.listeners.retain(|l| l.id != listener_id);
            }
        }))),
    }
}

/// Registration guard returned by `subscribe`.
///
/// Dropping it unsubscribes. [`unsubscribe`](Self::unsubscribe) may be called
/// any number of times; only the first call has an effect.
pub struct Subscription {
    cell: CellId,
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.borrow().is_some()
    }

    /// Cell this subscription listens to.
    #[must_use]
    pub const fn cell_id(&self) -> CellId {
        self.cell
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cell", &self.cell)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Borrowed read + write capability for a [`SharedCell`].
pub struct CellHandle<T> {
    inner: Weak<RefCell<CellInner<T>>>,
    id: CellId,
}

impl<T> Clone for CellHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
            id: self.id,
        }
    }
}

impl<T> fmt::Debug for CellHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellHandle")
            .field("id", &self.id)
            .field("live", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T: Clone + 'static> CellHandle<T> {
    fn upgrade(&self) -> Result<Shared<T>> {
        self.inner.upgrade().ok_or_else(Error::provider_gone::<T>)
    }

    #[must_use]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// Whether the owning cell still exists.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn read(&self) -> Result<T> {
        Ok(self.upgrade()?.borrow().value.clone())
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let inner = self.upgrade()?;
        let guard = inner.borrow();
        Ok(f(&guard.value))
    }

    pub fn write(&self, value: T) -> Result<Notification> {
        Ok(write_inner(&self.upgrade()?, value))
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) -> Result<Notification> {
        Ok(update_inner(&self.upgrade()?, f))
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Result<Subscription> {
        Ok(subscribe_inner(&self.upgrade()?, listener))
    }

    /// Downgrade to a read-only capability.
    #[must_use]
    pub fn reader(&self) -> CellReader<T> {
        CellReader {
            handle: self.clone(),
        }
    }
}

/// Borrowed read-only capability for a [`SharedCell`].
pub struct CellReader<T> {
    handle: CellHandle<T>,
}

impl<T> Clone for CellReader<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

impl<T> fmt::Debug for CellReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellReader").field(&self.handle).finish()
    }
}

impl<T: Clone + 'static> CellReader<T> {
    #[must_use]
    pub const fn id(&self) -> CellId {
        self.handle.id
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.handle.is_live()
    }

    pub fn read(&self) -> Result<T> {
        self.handle.read()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.handle.with(f)
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Result<Subscription> {
        self.handle.subscribe(listener)
    }
}
