//! Logging setup for the CLI.
//!
//! Uses `tracing` with `tracing-subscriber`. Log lines go to stderr so that
//! stdout only carries results.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber.
///
/// # Environment
/// - `RUST_LOG`: filter directive (default: `info`), e.g. `RUST_LOG=calc_core=debug`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}
