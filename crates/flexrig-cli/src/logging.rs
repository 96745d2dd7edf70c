//! Stderr log output for the CLI.
//!
//! The libraries log through the `log` facade. The subscriber installed here
//! bridges those records into `tracing` and prints them to stderr.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maps the number of `-v` flags to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Filter for a verbosity level. `RUST_LOG` directives are added on top.
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy()
}

/// Installs the stderr subscriber. Only the first call takes effect.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
