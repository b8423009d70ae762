//! # fieldlog-infra
//!
//! Composition root: turns a [`fieldlog_config::LoggingConfig`] into a
//! decorated [`fieldlog_ports::Logger`] and installs `tracing` subscribers.
//! This crate depends on `adapters`, `config`, `core`, `ports`, and `shared`.

/// Logger chain assembly from config.
mod logger_factory;
/// Subscriber setup for the tracing backend.
mod tracing_init;

pub use logger_factory::build_logger;
pub use tracing_init::init_tracing;

// Re-export redaction utilities for CLI boundary sanitization
pub use fieldlog_shared::{is_secret_key, redact_if_secret};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
