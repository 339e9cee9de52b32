#![forbid(unsafe_code)]

//! Core: observable cells, derived values, providers, and capability scopes.
//!
//! Everything here is single threaded (`Rc`/`RefCell`). Writes notify
//! listeners synchronously, before `write` returns.

pub mod cell;
pub mod computed;
pub mod error;
pub mod provider;
pub mod scope;

pub use cell::{CellHandle, CellId, CellReader, Notification, SharedCell, Subscription};
pub use computed::Computed;
pub use error::{Error, Result};
pub use provider::Provider;
pub use scope::Scope;
