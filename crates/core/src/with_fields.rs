//! Field-binder decorator.

use fieldlog_ports::{CallerSkip, Field, Level, Logger, add_caller_skip};
use std::fmt;
use std::sync::Arc;

/// Decorator that prepends a fixed set of fields to every call.
///
/// Each call forwards `bound ++ call` to the inner logger as a freshly
/// allocated vector. The bound fields are cloned per call, so hooks further
/// down the chain can mutate what they receive without touching the copy
/// stored here.
pub struct WithFields {
    inner: Arc<dyn Logger>,
    fields: Vec<Field>,
}

impl WithFields {
    /// Bind `fields` to `inner`.
    ///
    /// Adds one frame to the inner logger's caller-skip count when it
    /// supports the capability.
    pub fn new(inner: Arc<dyn Logger>, fields: Vec<Field>) -> Self {
        add_caller_skip(inner.as_ref(), 1);
        Self { inner, fields }
    }

    /// Fields prepended to every call.
    #[must_use]
    pub fn bound_fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Shorthand for [`WithFields::new`] returning a shared logger.
pub fn with_fields(inner: Arc<dyn Logger>, fields: Vec<Field>) -> Arc<dyn Logger> {
    Arc::new(WithFields::new(inner, fields))
}

impl fmt::Debug for WithFields {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WithFields")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl Logger for WithFields {
    #[track_caller]
    fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        let mut combined = Vec::with_capacity(self.fields.len() + fields.len());
        combined.extend(self.fields.iter().cloned());
        combined.extend(fields);
        self.inner.log(level, message, combined);
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        let skip: &dyn CallerSkip = self;
        self.inner.caller_skip().map(|_| skip)
    }

    fn inner_logger(&self) -> Option<&dyn Logger> {
        Some(self.inner.as_ref())
    }
}

impl CallerSkip for WithFields {
    fn add_caller_skip(&self, skip: usize) {
        add_caller_skip(self.inner.as_ref(), skip);
    }
}
