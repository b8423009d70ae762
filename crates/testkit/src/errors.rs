//! Test fixtures for shared error codes and envelopes.

use fieldlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Return a list of common error codes used in tests.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::not_found(),
        ErrorCode::io(),
        ErrorCode::internal(),
        ErrorCode::hook_failed(),
    ]
}

/// A failed hook error fixture.
pub fn hook_error() -> ErrorEnvelope {
    ErrorEnvelope::hook_failed("hook failed")
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}

/// A retriable sink error fixture.
pub fn sink_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::io(), "sink unavailable", ErrorClass::Retriable)
}
