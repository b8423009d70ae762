//! Logger that discards every record.

use fieldlog_ports::{Field, Level, Logger};

/// Logger that drops every record.
///
/// It does not support caller-skip, so decorators wrapping it skip the
/// adjustment silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn log(&self, _level: Level, _message: &str, _fields: Vec<Field>) {}
}
