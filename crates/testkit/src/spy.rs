//! Recording logger for assertions on decorator chains.

use fieldlog_ports::{CallerSkip, CallerSkipCounter, Field, Level, Logger};
use std::panic::Location;
use std::sync::Mutex;

/// One call observed by [`SpyLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Level of the call.
    pub level: Level,
    /// Message of the call.
    pub message: String,
    /// Fields exactly as received, before any flattening.
    pub fields: Vec<Field>,
    /// Call site reported through `#[track_caller]`.
    pub location: &'static Location<'static>,
}

impl RecordedCall {
    /// Keys of the recorded fields, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(Field::key).collect()
    }
}

/// Logger that records every call and supports caller-skip.
#[derive(Debug, Default)]
pub struct SpyLogger {
    calls: Mutex<Vec<RecordedCall>>,
    skip: CallerSkipCounter,
}

impl SpyLogger {
    /// Create a spy with a zero caller-skip baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spy whose caller-skip count starts at `baseline`.
    pub fn with_baseline(baseline: usize) -> Self {
        Self {
            calls: Mutex::default(),
            skip: CallerSkipCounter::new(baseline),
        }
    }

    /// Snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Messages of the recorded calls, in order.
    pub fn messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.message)
            .collect()
    }

    /// Drop every recorded call.
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    /// Current caller-skip count.
    pub fn caller_skip_count(&self) -> usize {
        self.skip.get()
    }
}

impl Logger for SpyLogger {
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        let call = RecordedCall {
            level,
            message: message.to_string(),
            fields,
            location: Location::caller(),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        Some(&self.skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_with_location() {
        let spy = SpyLogger::new();
        let line = line!() + 1;
        spy.info("hello", vec![Field::i64("n", 1)]);

        let calls = spy.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].level, Level::Info);
        assert_eq!(calls[0].keys(), vec!["n"]);
        assert_eq!(calls[0].location.line(), line);
        assert!(calls[0].location.file().ends_with("spy.rs"));

        spy.clear();
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn tracks_caller_skip_from_baseline() {
        let spy = SpyLogger::with_baseline(2);
        assert!(fieldlog_ports::add_caller_skip(&spy, 1));
        assert_eq!(spy.caller_skip_count(), 3);
    }
}
