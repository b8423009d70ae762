//! # fieldlog-ports
//!
//! Port traits for the fieldlog hexagonal architecture.
//!
//! This crate defines the logging boundary shared by every layer: the
//! [`Logger`] contract, the closed [`Field`] model, and the flattening engine
//! adapters use to expand nested [`Loggable`] values. It depends only on
//! `shared`.

pub mod field;
pub mod flatten;
pub mod logger;

pub use field::{ERROR_KEY, Field, FieldValue, Loggable, SharedError};
pub use flatten::{flatten_fields, is_flat};
pub use logger::{CallerSkip, CallerSkipCounter, Level, Logger, add_caller_skip, find_logger};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
