//! Plain-text logger adapter.

use crate::log_sink::LogSink;
use crate::render;
use fieldlog_ports::{
    CallerSkip, CallerSkipCounter, Field, Level, Logger, find_logger, flatten_fields,
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Frames between the call site and the point where [`TextLogger`] captures
/// its caller.
pub const TEXT_LOGGER_BASELINE_SKIP: usize = 2;

/// Logger writing `[LEVEL] file:line: message k=v ...` lines.
///
/// Values containing whitespace, quotes, or `=` are quoted.
pub struct TextLogger {
    sink: Arc<dyn LogSink>,
    min_level: Level,
    skip: CallerSkipCounter,
}

impl TextLogger {
    /// Create a text logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: Level::Info,
            skip: CallerSkipCounter::new(TEXT_LOGGER_BASELINE_SKIP),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Frames a frame-walking backend would skip for this logger.
    #[must_use]
    pub fn caller_skip_count(&self) -> usize {
        self.skip.get()
    }

    /// Find the text logger at the bottom of a decorator chain.
    pub fn find(logger: &dyn Logger) -> Option<&Self> {
        find_logger::<Self>(logger)
    }
}

impl fmt::Debug for TextLogger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TextLogger")
            .field("min_level", &self.min_level)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

impl Logger for TextLogger {
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        if !self.min_level.allows(level) {
            return;
        }

        let caller = Location::caller();
        let mut line = format!(
            "[{}] {}:{}: {message}",
            level.as_str().to_ascii_uppercase(),
            caller.file(),
            caller.line()
        );
        let pairs = render::to_pairs(&flatten_fields(fields));
        if !pairs.is_empty() {
            line.push(' ');
            line.push_str(&pairs);
        }
        line.push('\n');
        self.sink.write_line(&line);
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        Some(&self.skip)
    }
}
