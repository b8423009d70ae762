//! # fieldlog-adapters
//!
//! Backend adapters implementing [`fieldlog_ports::Logger`]: JSON lines, plain
//! text, and the `tracing` ecosystem, plus the sinks they write to.
//! This crate depends on `ports` only; decorators come from `core`.
//!
//! Every adapter flattens nested objects before rendering and exposes a
//! `find` helper that walks a decorator chain back to it.

pub mod json;
pub mod log_sink;
pub mod render;
pub mod text;
pub mod tracing_logger;

pub use json::{JSON_LOGGER_BASELINE_SKIP, JsonLogger};
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use text::{TEXT_LOGGER_BASELINE_SKIP, TextLogger};
pub use tracing_logger::{TRACING_LOGGER_BASELINE_SKIP, TRACING_TARGET, TracingLogger};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
