#![forbid(unsafe_code)]

//! Runtime: mounts a component tree, tracks which nodes read which cells,
//! and re-renders exactly those nodes (and their subtrees) after a write.
//!
//! The loop is single threaded and synchronous. [`Runtime::activate`] runs a
//! control callback and flushes before returning, so every subscribed view
//! reflects the new value by the time the triggering event is handled.

pub mod component;
pub mod element;
pub mod runtime;

pub use component::{Callback, Component, RenderCx};
pub use element::{ControlKind, Element, Node};
pub use runtime::{NodeId, Runtime};
