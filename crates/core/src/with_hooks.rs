//! Hook-runner decorator.
//!
//! Hooks run once per call, in registration order, before the record is
//! forwarded. They receive the very slice that is later handed to the inner
//! logger: key and value rewrites are visible to every later hook and to the
//! inner logger, while the slice itself cannot grow, shrink, or be reordered.

use fieldlog_ports::{CallerSkip, Field, Level, Logger, add_caller_skip};
use fieldlog_shared::ErrorEnvelope;
use std::fmt;
use std::sync::Arc;

/// Message used by [`LogHookError`] when a hook fails.
pub const HOOK_ERROR_MESSAGE: &str = "could not execute hook";

/// A hook inspects or rewrites a record before it reaches the inner logger.
///
/// Closures taking `(Level, &str, &mut [Field])` implement this trait.
pub trait Hook: Send + Sync {
    /// Process one record.
    fn run(&self, level: Level, message: &str, fields: &mut [Field]) -> Result<(), ErrorEnvelope>;
}

impl<F> Hook for F
where
    F: Fn(Level, &str, &mut [Field]) -> Result<(), ErrorEnvelope> + Send + Sync,
{
    fn run(&self, level: Level, message: &str, fields: &mut [Field]) -> Result<(), ErrorEnvelope> {
        self(level, message, fields)
    }
}

/// Receives errors returned by hooks.
///
/// Closures taking `(&dyn Logger, ErrorEnvelope)` implement this trait.
pub trait HookErrorHandler: Send + Sync {
    /// Report `error`. `inner` is the logger wrapped by the hook runner.
    #[track_caller]
    fn handle(&self, inner: &dyn Logger, error: ErrorEnvelope);
}

impl<F> HookErrorHandler for F
where
    F: Fn(&dyn Logger, ErrorEnvelope) + Send + Sync,
{
    fn handle(&self, inner: &dyn Logger, error: ErrorEnvelope) {
        self(inner, error);
    }
}

/// Default handler: logs the failure at error level through the inner logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHookError;

impl HookErrorHandler for LogHookError {
    #[track_caller]
    fn handle(&self, inner: &dyn Logger, error: ErrorEnvelope) {
        inner.error(HOOK_ERROR_MESSAGE, vec![Field::error(error)]);
    }
}

/// Decorator running hooks before delegating to the inner logger.
///
/// A failing hook never aborts the call: the error goes to the configured
/// [`HookErrorHandler`] right away, the remaining hooks still run, and the
/// inner logger is called exactly once afterwards.
pub struct WithHooks {
    inner: Arc<dyn Logger>,
    hooks: Vec<Arc<dyn Hook>>,
    on_error: Arc<dyn HookErrorHandler>,
}

impl WithHooks {
    /// Wrap `inner` with `hooks`, reporting failures through [`LogHookError`].
    ///
    /// Adds one frame to the inner logger's caller-skip count when it
    /// supports the capability.
    pub fn new(inner: Arc<dyn Logger>, hooks: Vec<Arc<dyn Hook>>) -> Self {
        add_caller_skip(inner.as_ref(), 1);
        Self {
            inner,
            hooks,
            on_error: Arc::new(LogHookError),
        }
    }

    /// Replace the handler receiving hook errors.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl HookErrorHandler + 'static) -> Self {
        self.on_error = Arc::new(handler);
        self
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

/// Shorthand for [`WithHooks::new`] returning a shared logger.
pub fn with_hooks(inner: Arc<dyn Logger>, hooks: Vec<Arc<dyn Hook>>) -> Arc<dyn Logger> {
    Arc::new(WithHooks::new(inner, hooks))
}

impl fmt::Debug for WithHooks {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WithHooks")
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl Logger for WithHooks {
    #[track_caller]
    fn log(&self, level: Level, message: &str, mut fields: Vec<Field>) {
        for hook in &self.hooks {
            if let Err(error) = hook.run(level, message, &mut fields) {
                self.on_error.handle(self.inner.as_ref(), error);
            }
        }
        self.inner.log(level, message, fields);
    }

    fn caller_skip(&self) -> Option<&dyn CallerSkip> {
        let skip: &dyn CallerSkip = self;
        self.inner.caller_skip().map(|_| skip)
    }

    fn inner_logger(&self) -> Option<&dyn Logger> {
        Some(self.inner.as_ref())
    }
}

impl CallerSkip for WithHooks {
    fn add_caller_skip(&self, skip: usize) {
        add_caller_skip(self.inner.as_ref(), skip);
    }
}
