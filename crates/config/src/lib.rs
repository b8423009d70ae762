//! # fieldlog-config
//!
//! Logging configuration schema, validation, and loading.
//! This crate depends on `ports` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_KEY_PREFIX, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_REDACT_SECRETS, EnvParseError, LoggingEnv,
    apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, load_logging_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogFormat, LoggingConfig, ValidatedLoggingConfig,
    parse_logging_config_json, parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
