//! # fieldlog-core
//!
//! Logger decorators for the fieldlog workspace.
//!
//! Everything here implements [`fieldlog_ports::Logger`] and composes freely:
//!
//! - [`NopLogger`] - drops every record
//! - [`WithFields`] - prepends bound fields to every call
//! - [`WithHooks`] - runs [`Hook`]s over each record before delegating
//! - [`hooks`] - built-in key prefixing and secret redaction
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fieldlog_core::{NopLogger, hooks, with_fields, with_hooks};
//! use fieldlog_ports::{Field, Logger};
//!
//! let logger = with_fields(
//!     with_hooks(Arc::new(NopLogger), vec![hooks::prefix_keys("app.")]),
//!     vec![Field::string("service", "billing")],
//! );
//! logger.info("started", vec![Field::u16("port", 8080)]);
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod hooks;
pub mod nop;
pub mod with_fields;
pub mod with_hooks;

pub use nop::NopLogger;
pub use with_fields::{WithFields, with_fields};
pub use with_hooks::{
    HOOK_ERROR_MESSAGE, Hook, HookErrorHandler, LogHookError, WithHooks, with_hooks,
};

/// Returns the core crate version.
#[must_use]
pub const fn core_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_crate_compiles() {
        assert!(!core_crate_version().is_empty());
    }
}
