#![forbid(unsafe_code)]

//! Subtree-scoped owner of exactly one [`SharedCell`].

use std::fmt;

use crate::cell::{CellHandle, CellReader, SharedCell};

/// Owns one cell for the lifetime of a mounted subtree.
///
/// Descendants receive [`CellHandle`]s or [`CellReader`]s. Unmounting the
/// provider drops the cell together with every listener registration;
/// capabilities handed out earlier then report
/// [`Error::ProviderGone`](crate::Error::ProviderGone).
pub struct Provider<T> {
    name: &'static str,
    cell: SharedCell<T>,
}

impl<T: Clone + 'static> Provider<T> {
    /// Allocate the provider's cell with `initial`.
    #[must_use]
    pub fn mount(name: &'static str, initial: T) -> Self {
        let cell = SharedCell::new(initial);
        tracing::debug!(
            message = "provider.mount",
            provider = name,
            cell = cell.id().get()
        );
        Self { name, cell }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn cell(&self) -> &SharedCell<T> {
        &self.cell
    }

    #[must_use]
    pub fn handle(&self) -> CellHandle<T> {
        self.cell.handle()
    }

    #[must_use]
    pub fn reader(&self) -> CellReader<T> {
        self.cell.reader()
    }

    /// Release the cell. Outstanding subscriptions become inert.
    pub fn unmount(self) {
        tracing::debug!(
            message = "provider.unmount",
            provider = self.name,
            cell = self.cell.id().get(),
            listeners = self.cell.listener_count()
        );
        drop(self);
    }
}

impl<T: fmt::Debug> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("cell", &self.cell)
            .finish()
    }
}
