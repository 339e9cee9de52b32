#![forbid(unsafe_code)]

//! Scripted demo of the shareui profile app.

pub mod cli;
pub mod error;
pub mod logging;
pub mod session;

pub use cli::{Action, Cli, OutputFormat, run, run_from_env};
pub use error::{DemoError, Result};
