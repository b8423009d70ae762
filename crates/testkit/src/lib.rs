//! # fieldlog-testkit
//!
//! Test helpers: a recording logger and loggable fixtures.
//! This crate depends on `ports` and `shared`.

pub mod errors;
pub mod fixtures;
pub mod spy;

pub use fixtures::{Request, User, sample_request};
pub use spy::{RecordedCall, SpyLogger};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
