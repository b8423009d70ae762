//! End-to-end tests: config file and env through the `fieldlog` binary.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fieldlog() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fieldlog"));
    for (key, _) in std::env::vars() {
        if key.starts_with("FIELDLOG_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
    command
}

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn record_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| !line.starts_with("info: "))
        .map(str::to_string)
        .collect()
}

#[test]
fn emit_writes_one_json_record_with_redaction() -> io::Result<()> {
    let output = fieldlog()
        .args([
            "emit",
            "--message",
            "charged",
            "--field",
            "amount=12.5",
            "--field",
            "attempt=2",
            "--field",
            "ok=true",
            "--field",
            "apiToken=sk-live",
        ])
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "emit failed: {output:?}");
    assert_eq!(stdout, "status: ok\n");

    let lines = record_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    let record: serde_json::Value = serde_json::from_str(&lines[0])?;
    assert_eq!(record["level"], "info");
    assert_eq!(record["message"], "charged");
    assert_eq!(record["fields"]["amount"], 12.5);
    assert_eq!(record["fields"]["attempt"], 2);
    assert_eq!(record["fields"]["ok"], true);
    assert_eq!(record["fields"]["apiToken"], "[REDACTED]");
    assert!(record["caller"].as_str().is_some_and(|caller| caller.contains(".rs:")));
    Ok(())
}

#[test]
fn emit_uses_text_config_and_bound_fields() -> io::Result<()> {
    let path = fixture_path("config/logging-config.valid.json");
    let output = fieldlog()
        .args(["--no-progress", "emit", "--level", "debug", "--message", "hello"])
        .args(["--field", "user=ada", "--config"])
        .arg(&path)
        .output()?;

    assert!(output.status.success(), "emit failed: {output:?}");
    let lines = record_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("[DEBUG] "), "{}", lines[0]);
    assert!(
        lines[0].ends_with(": hello app.region=eu-west-1 app.service=billing app.user=ada"),
        "{}",
        lines[0]
    );
    Ok(())
}

#[test]
fn env_level_filters_the_record() -> io::Result<()> {
    let output = fieldlog()
        .args(["--no-progress", "emit", "--level", "info", "--message", "quiet"])
        .env("FIELDLOG_LOG_LEVEL", "error")
        .output()?;

    assert!(output.status.success(), "emit failed: {output:?}");
    assert!(record_lines(&output).is_empty());
    Ok(())
}

#[test]
fn nop_format_drops_everything() -> io::Result<()> {
    let output = fieldlog()
        .args(["--no-progress", "emit", "--level", "error", "--message", "gone"])
        .env("FIELDLOG_LOG_FORMAT", "nop")
        .output()?;

    assert!(output.status.success(), "emit failed: {output:?}");
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn malformed_field_exits_with_invalid_input() -> io::Result<()> {
    let output = fieldlog()
        .args(["emit", "--message", "x", "--field", "missing-separator"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid input"), "{stderr}");
    Ok(())
}

#[test]
fn missing_config_file_is_reported() -> io::Result<()> {
    let output = fieldlog()
        .args(["emit", "--message", "x", "--config", "/no/such/fieldlog.toml"])
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: config:config_file_not_found"), "{stdout}");
    Ok(())
}
