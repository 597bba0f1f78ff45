//! Logging bootstrap shared by the resource binaries.
//!
//! Concourse shows stderr to pipeline users and the resource contract
//! reserves it for the failure message, so logging is off unless `RUST_LOG`
//! asks for it. Output always goes to stderr; stdout carries the protocol
//! response.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_FILTER: &str = "off";

/// Builds the filter from a `RUST_LOG`-style directive string, falling back
/// to [`DEFAULT_FILTER`] when it is absent or unparsable.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let fmt_layer = fmt::layer()
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr);

    // A second initialization in the same process is a no-op.
    let _ = tracing_subscriber::registry()
        .with(build_filter(directives.as_deref()))
        .with(fmt_layer)
        .try_init();
}
