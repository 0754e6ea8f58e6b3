//! Tracing setup for the fitlog binary.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at `warn`
pub fn init() {
    init_with_level("warn")
}

/// Install the global subscriber, filtering at `default_level` unless
/// `RUST_LOG` is set
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
