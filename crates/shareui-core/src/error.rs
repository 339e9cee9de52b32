#![forbid(unsafe_code)]

//! Error taxonomy shared by every shareui crate.
//!
//! All variants are programmer or configuration errors. Nothing here is
//! retried; callers surface them immediately.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A consumer asked a scope for a value kind no enclosing provider offers.
    #[error("missing provider: no `{type_name}` provided in scope `{scope}` or its ancestors")]
    MissingProvider {
        type_name: &'static str,
        scope: String,
    },

    /// A capability handle outlived the provider that issued it.
    #[error("provider for `{type_name}` has been unmounted")]
    ProviderGone { type_name: &'static str },

    #[error("invalid theme value: {value:?} (expected \"dark\" or \"light\")")]
    InvalidTheme { value: String },

    #[error("no mounted control with id {id:?}")]
    UnknownControl { id: String },

    #[error("control id {id:?} is already bound by another view node")]
    DuplicateControl { id: String },

    #[error("view node {id} is not mounted")]
    NodeNotMounted { id: u64 },
}

impl Error {
    #[must_use]
    pub fn missing_provider<T: 'static>(scope: impl Into<String>) -> Self {
        Self::MissingProvider {
            type_name: std::any::type_name::<T>(),
            scope: scope.into(),
        }
    }

    #[must_use]
    pub fn provider_gone<T: 'static>() -> Self {
        Self::ProviderGone {
            type_name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn invalid_theme(value: impl Into<String>) -> Self {
        Self::InvalidTheme {
            value: value.into(),
        }
    }
}
