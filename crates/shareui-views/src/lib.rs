#![forbid(unsafe_code)]

//! User profile demo: a header and a profile view sharing one user cell.
//!
//! [`AppProviders`] owns the user and theme cells. [`components::Root`] is
//! composed from its [`Scope`](shareui_core::Scope) and mounted on a
//! [`Runtime`](shareui_runtime::Runtime) by [`mount_app`].

pub mod app;
pub mod components;
pub mod model;

pub use app::{AppProviders, login, logout, set_theme, toggle_session, toggle_theme};
pub use model::{Session, Theme, User, default_user};

use shareui_core::Result;
use shareui_runtime::Runtime;

/// Compose the root from `providers` and mount it on a fresh runtime.
pub fn mount_app(providers: &AppProviders) -> Result<Runtime> {
    let root = components::Root::compose(providers.scope())?;
    let mut runtime = Runtime::new();
    runtime.mount(root)?;
    Ok(runtime)
}
