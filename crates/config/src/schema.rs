//! Logging configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Bound field keys are trimmed during normalization.

use fieldlog_ports::Level;
use fieldlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Backend adapter selected by the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `[LEVEL] file:line: message k=v` lines.
    Text,
    /// Events forwarded to the installed `tracing` subscriber.
    Tracing,
    /// Drop everything.
    Nop,
}

impl LogFormat {
    /// Lowercase format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Tracing => "tracing",
            Self::Nop => "nop",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ErrorEnvelope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "tracing" => Ok(Self::Tracing),
            "nop" => Ok(Self::Nop),
            _ => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_format"),
                "unknown log format; expected json, text, tracing, or nop",
            )
            .with_metadata("format", value)),
        }
    }
}

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Backend adapter.
    pub format: LogFormat,
    /// Minimum level written by the JSON and text backends.
    pub level: Level,
    /// Replace values of secret-looking keys before they reach the backend.
    pub redact_secrets: bool,
    /// Prefix prepended to every field key, keys inside objects included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
    /// String fields bound to every record.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            format: LogFormat::Json,
            level: Level::Info,
            redact_secrets: true,
            key_prefix: None,
            fields: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLoggingConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }

        if self.key_prefix.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigSchemaError::EmptyKeyPrefix);
        }

        let mut fields = BTreeMap::new();
        for (key, value) in std::mem::take(&mut self.fields) {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyFieldKey);
            }
            fields.insert(trimmed.to_string(), value);
        }
        self.fields = fields;

        Ok(ValidatedLoggingConfig { raw: self })
    }

    /// Returns true when at least one hook is configured.
    #[must_use]
    pub const fn has_hooks(&self) -> bool {
        self.redact_secrets || self.key_prefix.is_some()
    }
}

/// Config that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggingConfig {
    raw: LoggingConfig,
}

impl ValidatedLoggingConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggingConfig {
        self.raw
    }
}

impl AsRef<LoggingConfig> for ValidatedLoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggingConfig {
    type Target = LoggingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Validation failures for [`LoggingConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// `keyPrefix` is present but empty.
    #[error("keyPrefix must be non-empty when set")]
    EmptyKeyPrefix,
    /// A bound field has an empty key.
    #[error("bound field keys must be non-empty")]
    EmptyFieldKey,
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::EmptyKeyPrefix => ErrorCode::new("config", "empty_key_prefix"),
            Self::EmptyFieldKey => ErrorCode::new("config", "empty_field_key"),
        }
    }
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::EmptyKeyPrefix => envelope.with_metadata("field", "keyPrefix"),
            ConfigSchemaError::EmptyFieldKey => envelope.with_metadata("field", "fields"),
        }
    }
}

/// Parse a logging config from a JSON string, applying validation.
pub fn parse_logging_config_json(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logging config from a TOML string, applying validation.
pub fn parse_logging_config_toml(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}
