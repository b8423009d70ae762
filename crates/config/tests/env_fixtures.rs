//! Integration tests for env parsing and env-to-config merging.

use fieldlog_config::{
    EnvParseError, LogFormat, LoggingConfig, LoggingEnv, apply_env_overrides,
    load_logging_config_from_path,
};
use fieldlog_ports::Level;
use fieldlog_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
        .join("testkit")
        .join("fixtures")
}

fn read_env_map(relative: &str) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let contents = fs::read_to_string(fixtures_root().join(relative))?;
    Ok(serde_json::from_str(&contents)?)
}

#[test]
fn env_fixtures_merge_into_effective_config() -> Result<(), Box<dyn Error>> {
    let env = LoggingEnv::from_map(&read_env_map("env/logging-env.valid.json")?)?;
    let config = apply_env_overrides(LoggingConfig::default(), &env)?;

    assert_eq!(config.format, LogFormat::Nop);
    assert_eq!(config.level, Level::Error);
    assert!(!config.redact_secrets);
    assert_eq!(config.key_prefix.as_deref(), Some("env."));
    Ok(())
}

#[test]
fn env_wins_over_file() -> Result<(), Box<dyn Error>> {
    let env = LoggingEnv::from_map(&read_env_map("env/logging-env.valid.json")?)?;
    let config = load_logging_config_from_path(
        Some(&fixtures_root().join("config/logging-config.valid.json")),
        &env,
    )?;

    assert_eq!(config.format, LogFormat::Nop);
    assert_eq!(config.key_prefix.as_deref(), Some("env."));
    assert_eq!(
        config.fields.get("service").map(String::as_str),
        Some("billing"),
        "file-only values survive"
    );
    Ok(())
}

#[test]
fn invalid_env_fixture_maps_to_envelope() -> Result<(), Box<dyn Error>> {
    let error = LoggingEnv::from_map(&read_env_map("env/logging-env.invalid-bool.json")?)
        .err()
        .ok_or("expected error")?;
    assert!(matches!(error, EnvParseError::InvalidBool { .. }));

    let envelope = ErrorEnvelope::from(error);
    assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_bool"));
    assert_eq!(
        envelope.metadata.get("value").map(String::as_str),
        Some("sometimes")
    );
    Ok(())
}
