//! Structured logging boundary contract.
//!
//! [`Logger`] is the only capability application code depends on. Two
//! optional extensions are queried at runtime instead of being required:
//!
//! - [`CallerSkip`], through [`Logger::caller_skip`]: lets a decorator tell
//!   the backend about the extra frame it introduces.
//! - [`Logger::inner_logger`]: lets adapters walk a decorator chain back to
//!   their own concrete type (see [`find_logger`]).

use crate::field::Field;
use fieldlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Log level, ordered `Debug < Info < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Information useful for developers.
    Debug,
    /// Information useful for users.
    #[default]
    Info,
    /// Errors worth handling.
    Error,
}

impl Level {
    /// Lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Error => "error",
        }
    }

    /// Returns true when a record at `level` passes a `self` threshold.
    #[must_use]
    pub fn allows(self, level: Self) -> bool {
        level >= self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ErrorEnvelope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "error" => Ok(Self::Error),
            _ => Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "unknown log level; expected debug, info, or error",
            )
            .with_metadata("level", value)),
        }
    }
}

/// Boundary contract for structured logging.
///
/// Every call owns its field vector: implementations may reorder, extend, or
/// mutate it freely without affecting other calls.
///
/// All logging methods are `#[track_caller]`, so an adapter reading
/// [`std::panic::Location::caller`] inside [`Logger::log`] sees the original
/// call site, no matter how many decorators sit in between.
pub trait Logger: Any + Send + Sync {
    /// Emit a record at `level`.
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>);

    /// Emit a debug record.
    #[track_caller]
    fn debug(&self, message: &str, fields: Vec<Field>) {
        self.log(Level::Debug, message, fields);
    }

    /// Emit an info record.
    #[track_caller]
    fn info(&self, message: &str, fields: Vec<Field>) {
        self.log(Level::Info, message, fields);
    }

    /// Emit an error record.
    #[track_caller]
    fn error(&self, message: &str, fields: Vec<Field>) {
        self.log(Level::Error, message, fields);
    }

    /// Caller-skip capability, when this logger supports it.
    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        None
    }

    /// The wrapped logger, when this logger decorates another one.
    fn inner_logger(&self) -> Option<&dyn Logger> {
        None
    }
}

/// Optional extension: track how many frames separate the call site from
/// the point where the backend captures file and line.
pub trait CallerSkip: Send + Sync {
    /// Increase the tracked skip count by `skip`.
    fn add_caller_skip(&self, skip: usize);
}

/// Add `skip` to the logger's caller-skip count.
///
/// Returns false when the logger does not support the capability.
pub fn add_caller_skip(logger: &dyn Logger, skip: usize) -> bool {
    logger.caller_skip().is_some_and(|skipper| {
        skipper.add_caller_skip(skip);
        true
    })
}

/// Walk a decorator chain until a logger of type `T` is found.
///
/// ```
/// use fieldlog_ports::{Field, Level, Logger, find_logger};
///
/// struct Stdout;
///
/// impl Logger for Stdout {
///     fn log(&self, _level: Level, _message: &str, _fields: Vec<Field>) {}
/// }
///
/// let logger: &dyn Logger = &Stdout;
/// assert!(find_logger::<Stdout>(logger).is_some());
/// ```
pub fn find_logger<T: Logger>(logger: &dyn Logger) -> Option<&T> {
    let mut current = logger;
    loop {
        let any: &dyn Any = current;
        if let Some(found) = any.downcast_ref::<T>() {
            return Some(found);
        }
        current = current.inner_logger()?;
    }
}

/// Atomic caller-skip counter shared by adapters.
///
/// The count starts at the adapter's baseline and only grows when decorators
/// wrap the adapter.
#[derive(Debug)]
pub struct CallerSkipCounter {
    skip: AtomicUsize,
}

impl CallerSkipCounter {
    /// Create a counter starting at `baseline`.
    #[must_use]
    pub const fn new(baseline: usize) -> Self {
        Self {
            skip: AtomicUsize::new(baseline),
        }
    }

    /// Current skip count.
    #[must_use]
    pub fn get(&self) -> usize {
        self.skip.load(Ordering::Relaxed)
    }
}

impl Default for CallerSkipCounter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CallerSkip for CallerSkipCounter {
    fn add_caller_skip(&self, skip: usize) {
        self.skip.fetch_add(skip, Ordering::Relaxed);
    }
}
