//! Config loading helpers (env + file).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::env::{LoggingEnv, apply_env_overrides};
use crate::schema::{LoggingConfig, ValidatedLoggingConfig};
use fieldlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the logging config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`LoggingEnv`)
/// - config JSON (file content)
/// - defaults (`LoggingConfig::default()`)
pub fn load_logging_config_from_sources(
    config_json: Option<&str>,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig> {
    let config = match config_json {
        None => LoggingConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

/// Load the logging config from an optional file path.
///
/// `.json` and extension-less paths parse as JSON, `.toml` as TOML.
pub fn load_logging_config_from_path(
    config_path: Option<&Path>,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig> {
    let config = match config_path {
        None => LoggingConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    apply_env_overrides(config, env)
}

/// Load the logging config from std env and an optional file path.
pub fn load_logging_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedLoggingConfig> {
    let env = LoggingEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_logging_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggingConfig) -> Result<String> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LoggingConfig) -> Result<String> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<LoggingConfig> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
