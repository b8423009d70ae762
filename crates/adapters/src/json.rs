//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use crate::render;
use fieldlog_ports::{
    CallerSkip, CallerSkipCounter, Field, Level, Logger, find_logger, flatten_fields,
};
use serde_json::{Map, Value};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Frames between the call site and the point where [`JsonLogger`] captures
/// its caller.
pub const JSON_LOGGER_BASELINE_SKIP: usize = 1;

const SERIALIZE_FAILED_LINE: &str =
    "{\"timestampMs\":0,\"level\":\"error\",\"message\":\"log serialization failed\"}\n";

/// JSON logger emitting one line per record.
///
/// Each line is an object with `timestampMs`, `level`, `message`, `caller`,
/// and, when present, `fields`. Fields are flattened first; when a key
/// appears twice the later value wins, so call-site fields override bound
/// ones.
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    min_level: Level,
    skip: CallerSkipCounter,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: Level::Info,
            skip: CallerSkipCounter::new(JSON_LOGGER_BASELINE_SKIP),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Minimum level that reaches the sink.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Frames a frame-walking backend would skip for this logger.
    #[must_use]
    pub fn caller_skip_count(&self) -> usize {
        self.skip.get()
    }

    /// Find the JSON logger at the bottom of a decorator chain.
    pub fn find(logger: &dyn Logger) -> Option<&Self> {
        find_logger::<Self>(logger)
    }

    fn encode(
        level: Level,
        message: &str,
        caller: &Location<'_>,
        fields: Vec<Field>,
    ) -> Map<String, Value> {
        let mut rendered = Map::new();
        for field in flatten_fields(fields) {
            let (key, value) = field.into_parts();
            rendered.insert(key, render::to_json(&value));
        }

        let mut payload = Map::new();
        payload.insert(
            "timestampMs".to_string(),
            Value::from(render::now_epoch_ms()),
        );
        payload.insert("level".to_string(), Value::from(level.as_str()));
        payload.insert("message".to_string(), Value::from(message));
        payload.insert(
            "caller".to_string(),
            Value::String(format!("{}:{}", caller.file(), caller.line())),
        );
        if !rendered.is_empty() {
            payload.insert("fields".to_string(), Value::Object(rendered));
        }
        payload
    }
}

impl fmt::Debug for JsonLogger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonLogger")
            .field("min_level", &self.min_level)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

impl Logger for JsonLogger {
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        if !self.min_level.allows(level) {
            return;
        }

        let payload = Self::encode(level, message, Location::caller(), fields);
        let line = serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| SERIALIZE_FAILED_LINE.to_string(),
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        Some(&self.skip)
    }
}
