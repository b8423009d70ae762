//! Adapter forwarding records to the `tracing` ecosystem.

use crate::render;
use fieldlog_ports::{
    CallerSkip, CallerSkipCounter, Field, Level, Logger, find_logger, flatten_fields,
};
use std::panic::Location;

/// Frames between the call site and the point where [`TracingLogger`]
/// captures its caller.
pub const TRACING_LOGGER_BASELINE_SKIP: usize = 1;

/// Event target used for every forwarded record.
pub const TRACING_TARGET: &str = "fieldlog";

/// Logger emitting one `tracing` event per record.
///
/// Events carry a `caller` (`file:line`) and a `fields` value rendering the
/// flattened fields as `k=v` pairs, quoted like the text backend. `tracing`
/// field names are fixed at compile time, so per-record keys cannot become
/// event fields of their own. Level filtering is left to the installed
/// subscriber.
#[derive(Debug)]
pub struct TracingLogger {
    skip: CallerSkipCounter,
}

impl TracingLogger {
    /// Create the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip: CallerSkipCounter::new(TRACING_LOGGER_BASELINE_SKIP),
        }
    }

    /// Frames a frame-walking backend would skip for this logger.
    #[must_use]
    pub fn caller_skip_count(&self) -> usize {
        self.skip.get()
    }

    /// Find the tracing logger at the bottom of a decorator chain.
    pub fn find(logger: &dyn Logger) -> Option<&Self> {
        find_logger::<Self>(logger)
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for TracingLogger {
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        let location = Location::caller();
        let caller = format!("{}:{}", location.file(), location.line());
        let fields = render_pairs(fields);
        match level {
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, caller = %caller, fields = %fields, "{message}");
            },
            Level::Info => {
                tracing::info!(target: TRACING_TARGET, caller = %caller, fields = %fields, "{message}");
            },
            Level::Error => {
                tracing::error!(target: TRACING_TARGET, caller = %caller, fields = %fields, "{message}");
            },
        }
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        Some(&self.skip)
    }
}

fn render_pairs(fields: Vec<Field>) -> String {
    render::to_pairs(&flatten_fields(fields))
}
