//! `tracing-subscriber` installation for binaries using the tracing backend.

use fieldlog_ports::Level;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set and valid. Returns
/// `false` when a global subscriber is already installed; the existing one
/// stays in place.
pub fn init_tracing(level: Level) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::new(level.as_str())
}
