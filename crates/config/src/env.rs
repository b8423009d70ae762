//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present but empty or malformed
//! fails instead of being ignored. Values of secret-looking variables are
//! redacted in error metadata.

use crate::schema::{LogFormat, LoggingConfig, ValidatedLoggingConfig};
use fieldlog_ports::Level;
use fieldlog_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use thiserror::Error;

/// Env var: backend format (`json`, `text`, `tracing`, `nop`).
pub const ENV_LOG_FORMAT: &str = "FIELDLOG_LOG_FORMAT";
/// Env var: minimum level (`debug`, `info`, `error`).
pub const ENV_LOG_LEVEL: &str = "FIELDLOG_LOG_LEVEL";
/// Env var: redact secret-looking keys.
pub const ENV_REDACT_SECRETS: &str = "FIELDLOG_REDACT_SECRETS";
/// Env var: prefix prepended to every field key.
pub const ENV_KEY_PREFIX: &str = "FIELDLOG_KEY_PREFIX";

const ENV_VARS: [&str; 4] = [
    ENV_LOG_FORMAT,
    ENV_LOG_LEVEL,
    ENV_REDACT_SECRETS,
    ENV_KEY_PREFIX,
];

/// Env overrides parsed from the process environment or a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Backend format override.
    pub format: Option<LogFormat>,
    /// Minimum level override.
    pub level: Option<Level>,
    /// Redaction toggle override.
    pub redact_secrets: Option<bool>,
    /// Key prefix override.
    pub key_prefix: Option<String>,
}

impl LoggingEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            format: parse_optional_enum(map, ENV_LOG_FORMAT)?,
            level: parse_optional_enum(map, ENV_LOG_LEVEL)?,
            redact_secrets: parse_optional_bool(map, ENV_REDACT_SECRETS)?,
            key_prefix: parse_optional_trimmed_string(map, ENV_KEY_PREFIX)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ENV_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.format.is_none()
            && self.level.is_none()
            && self.redact_secrets.is_none()
            && self.key_prefix.is_none()
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    #[error("{var} must be a boolean")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value))
            },
        }
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(redact) = env.redact_secrets {
        config.redact_secrets = redact;
    }
    if let Some(prefix) = &env.key_prefix {
        config.key_prefix = Some(prefix.clone());
    }

    config.validate_and_normalize().map_err(Into::into)
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned()))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool { var, value: raw }),
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<T>, EnvParseError>
where
    T: std::str::FromStr,
{
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    raw.parse::<T>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum { var, value: raw })
}
