#![forbid(unsafe_code)]

//! Log output for the demo binary: human-readable lines on stderr so they
//! never interleave with the rendered views on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::{DemoError, Result};

/// Install the global subscriber. `RUST_LOG`, when set, wins over `filter`.
pub fn init(filter: &str) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) if !env.is_empty() => env,
        _ => filter.to_string(),
    };
    let env_filter = EnvFilter::try_new(&filter).map_err(|err| DemoError::LogFilter {
        filter: filter.clone(),
        message: err.to_string(),
    })?;
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}
