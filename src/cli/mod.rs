//! Command-line front end
//!
//! Contains the logic behind the `pinner` binary, kept in the library so it
//! can be exercised without spawning a process.

pub mod commands;

pub use commands::{Command, execute, run_command};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` in verbose mode and the
/// configured level in normal mode.
pub fn init_logging(verbose: bool, level: &str) {
    let fallback = if verbose { "debug" } else { level };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
