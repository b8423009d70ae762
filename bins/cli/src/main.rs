//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{EmitCommandInput, run_config_show, run_emit};
use error::{CliError, ExitCode};
use fieldlog_infra::is_secret_key;
use fieldlog_ports::Level;
use fieldlog_shared::{ErrorEnvelope, REDACTED};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fieldlog",
    version,
    about = "Structured logging through configurable decorator chains",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log one record through the configured logger chain (to stderr).
    Emit {
        /// Record level: debug, info, or error.
        #[arg(long, default_value = "info")]
        level: Level,
        /// Record message.
        #[arg(long)]
        message: String,
        /// Call-site field as key=value (repeatable).
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after applying env overrides.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Render as TOML instead of JSON.
        #[arg(long)]
        toml: bool,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Emit {
            level,
            message,
            fields,
            config,
        } => run_emit(
            mode,
            &EmitCommandInput {
                level: *level,
                message,
                fields,
                config: config.as_deref(),
            },
        ),
        Commands::Config { command } => match command {
            ConfigCommands::Show { config, toml } => {
                run_config_show(mode, config.as_deref(), *toml)
            },
        },
    }
}

pub(crate) fn format_error_output(
    mode: OutputMode,
    error: &ErrorEnvelope,
    exit_code: ExitCode,
) -> CliOutput {
    let error = sanitize_error(error.clone());

    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });

        // This is a CLI boundary, so JSON serialization errors are internal.
        let mut output = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"core:internal\",\"message\":\"internal error\"}}".to_string()
        });
        output.push('\n');
        output
    } else {
        format_error_text(&error)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code,
    }
}

fn sanitize_error(mut error: ErrorEnvelope) -> ErrorEnvelope {
    for (key, value) in &mut error.metadata {
        if is_secret_key(key) {
            *value = REDACTED.to_string();
        }
    }
    error
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code.to_string());
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(&error.kind.to_string());
    out.push('\n');

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

pub(crate) fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use clap::CommandFactory;
    use fieldlog_shared::ErrorCode;
    use std::path::Path;

    fn workspace_root() -> PathBuf {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest_dir
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| manifest_dir.to_path_buf())
    }

    fn fixture_path(relative: &str) -> PathBuf {
        workspace_root()
            .join("crates")
            .join("testkit")
            .join("fixtures")
            .join(relative)
    }

    fn text_mode() -> OutputMode {
        OutputMode::from_args(&OutputArgs {
            output: None,
            no_progress: true,
        })
    }

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["cli", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn emit_arguments_parse() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "fieldlog", "emit", "--level", "error", "--message", "boom", "--field", "a=1",
            "--field", "b=x",
        ])?;
        let Commands::Emit { level, fields, .. } = cli.command else {
            return Err("expected emit".into());
        };
        assert_eq!(level, Level::Error);
        assert_eq!(fields, vec!["a=1".to_string(), "b=x".to_string()]);
        Ok(())
    }

    #[test]
    fn unknown_level_is_rejected_by_clap() {
        let result = Cli::try_parse_from(["fieldlog", "emit", "--level", "warn", "--message", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn exit_codes_for_errors() -> Result<(), Box<dyn std::error::Error>> {
        let io_error = CliError::Io(io::Error::other("io"));
        let serialization_error = match serde_json::from_str::<serde_json::Value>("not-json") {
            Ok(_) => return Err("expected serialization error".into()),
            Err(error) => CliError::Serialization(error),
        };

        assert_eq!(io_error.exit_code(), ExitCode::Io);
        assert_eq!(serialization_error.exit_code(), ExitCode::Internal);
        assert_eq!(
            ExitCode::for_envelope(&ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad")),
            ExitCode::InvalidInput
        );
        Ok(())
    }

    #[test]
    fn error_formatting_redacts_sensitive_meta_keys() {
        let mut error = ErrorEnvelope::expected(ErrorCode::new("config", "invalid_json"), "bad");
        error
            .metadata
            .insert("apiKey".to_string(), "secret-value".to_string());
        error
            .metadata
            .insert("field".to_string(), "keyPrefix".to_string());

        let sanitized = sanitize_error(error);
        assert_eq!(
            sanitized.metadata.get("apiKey").map(String::as_str),
            Some(REDACTED)
        );
        assert_eq!(
            sanitized.metadata.get("field").map(String::as_str),
            Some("keyPrefix")
        );
    }

    #[test]
    fn config_show_failure_exit_code_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
        let path = fixture_path("config/logging-config.invalid-version.json");
        let output = run_config_show(text_mode(), Some(&path), false)?;
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        assert!(output.stdout.contains("status: error"));
        assert!(output.stdout.contains("code: config:unsupported_version"));
        Ok(())
    }

    #[test]
    fn config_show_json_wraps_effective_config() -> Result<(), Box<dyn std::error::Error>> {
        let mode = OutputMode::from_args(&OutputArgs {
            output: Some(OutputFormat::Json),
            no_progress: true,
        });
        let path = fixture_path("config/logging-config.valid.toml");
        let output = run_config_show(mode, Some(&path), false)?;
        let value: serde_json::Value = serde_json::from_str(output.stdout.trim())?;
        assert_eq!(value["status"], "ok");
        assert!(value["effectiveConfig"]["fields"]["service"].is_string());
        assert!(output.stderr.is_empty());
        Ok(())
    }

    #[test]
    fn log_info_respects_no_progress() {
        let mut stderr = String::new();
        log_info(&mut stderr, "quiet", true);
        assert!(stderr.is_empty());
        log_info(&mut stderr, "loud", false);
        assert_eq!(stderr, "info: loud\n");
    }
}
