//! Error envelope types and helpers.

use crate::redaction::{REDACTED, is_secret_key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, io};

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Expected failures (invalid config, bad user input, failing hooks).
    Expected,
    /// Invariant violations in composition logic.
    Invariant,
    /// Unexpected failures (I/O, sinks).
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Invariant => formatter.write_str("invariant"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Retry classification for failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The operation can be retried safely.
    Retriable,
    /// The operation should not be retried.
    NonRetriable,
}

impl ErrorClass {
    /// Returns true when the error is considered retriable.
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Retriable)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retriable => formatter.write_str("retriable"),
            Self::NonRetriable => formatter.write_str("non-retriable"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Invalid input code.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// Not found code.
    pub fn not_found() -> Self {
        Self::new("core", "not_found")
    }

    /// Permission denied code.
    pub fn permission_denied() -> Self {
        Self::new("core", "permission_denied")
    }

    /// I/O error code.
    pub fn io() -> Self {
        Self::new("core", "io")
    }

    /// Internal failure code.
    pub fn internal() -> Self {
        Self::new("core", "internal")
    }

    /// A logging hook refused or failed to process a record.
    pub fn hook_failed() -> Self {
        Self::new("hook", "failed")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Retry classification.
    pub class: ErrorClass,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error with non-retriable classification.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Expected,
            class: ErrorClass::NonRetriable,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an invariant error (always non-retriable).
    pub fn invariant(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Invariant,
            class: ErrorClass::NonRetriable,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Create an unexpected error with the provided retry classification.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>, class: ErrorClass) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            class,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Shorthand for a failed hook.
    pub fn hook_failed(message: impl Into<String>) -> Self {
        Self::expected(ErrorCode::hook_failed(), message)
    }

    /// Attach a single metadata entry.
    ///
    /// Values under secret-looking keys are stored redacted.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = if is_secret_key(&key) {
            REDACTED.to_string()
        } else {
            value.into()
        };
        self.metadata.insert(key, value);
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {} {}: {}",
            self.kind, self.class, self.code, self.message
        )
    }
}

impl std::error::Error for ErrorEnvelope {}

impl From<io::Error> for ErrorEnvelope {
    fn from(error: io::Error) -> Self {
        let kind = error.kind();
        let class = if is_retriable_io(kind) {
            ErrorClass::Retriable
        } else {
            ErrorClass::NonRetriable
        };
        Self::unexpected(error_code_from_io_kind(kind), error.to_string(), class)
    }
}

fn error_code_from_io_kind(kind: io::ErrorKind) -> ErrorCode {
    match kind {
        io::ErrorKind::NotFound => ErrorCode::not_found(),
        io::ErrorKind::PermissionDenied => ErrorCode::permission_denied(),
        _ => ErrorCode::io(),
    }
}

const fn is_retriable_io(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::BrokenPipe
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_constructors() {
        let expected = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(expected.kind, ErrorKind::Expected);
        assert_eq!(expected.class, ErrorClass::NonRetriable);
        assert_eq!(expected.code, ErrorCode::invalid_input());

        let invariant = ErrorEnvelope::invariant(ErrorCode::internal(), "boom");
        assert_eq!(invariant.kind, ErrorKind::Invariant);
        assert_eq!(invariant.class, ErrorClass::NonRetriable);

        let unexpected =
            ErrorEnvelope::unexpected(ErrorCode::io(), "sink closed", ErrorClass::Retriable);
        assert_eq!(unexpected.kind, ErrorKind::Unexpected);
        assert!(unexpected.class.is_retriable());
    }

    #[test]
    fn hook_failed_uses_hook_namespace() {
        let error = ErrorEnvelope::hook_failed("enricher unavailable");
        assert_eq!(error.code.namespace(), "hook");
        assert_eq!(error.code.code(), "failed");
        assert_eq!(
            error.to_string(),
            "expected non-retriable hook:failed: enricher unavailable"
        );
    }

    #[test]
    fn io_errors_map_to_codes() {
        let missing = ErrorEnvelope::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(missing.code, ErrorCode::not_found());
        assert_eq!(missing.kind, ErrorKind::Unexpected);

        let broken = ErrorEnvelope::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert_eq!(broken.code, ErrorCode::io());
        assert!(broken.class.is_retriable());
    }

    #[test]
    fn secret_metadata_is_redacted_on_insert() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad")
            .with_metadata("apiToken", "secret")
            .with_metadata("path", "value");

        assert_eq!(
            error.metadata.get("apiToken").map(String::as_str),
            Some(REDACTED)
        );
        assert_eq!(error.metadata.get("path").map(String::as_str), Some("value"));
    }

    #[test]
    fn envelope_serializes_without_empty_metadata() -> Result<(), serde_json::Error> {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad");
        let encoded = serde_json::to_value(&error)?;
        assert!(encoded.get("metadata").is_none());
        assert_eq!(
            encoded.get("message").and_then(serde_json::Value::as_str),
            Some("bad")
        );
        Ok(())
    }
}
