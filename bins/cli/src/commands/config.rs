//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, log_info};
use fieldlog_config::{load_logging_config_std_env, to_pretty_json, to_pretty_toml};
use std::path::Path;

/// Run `config show`: print the effective config after env overrides.
///
/// Text output is the bare config (JSON, or TOML with `toml`) so it can be
/// redirected into a file and loaded again.
pub fn run_config_show(
    mode: OutputMode,
    path: Option<&Path>,
    toml: bool,
) -> Result<CliOutput, CliError> {
    let config = match load_logging_config_std_env(path) {
        Ok(config) => config,
        Err(error) => {
            let exit_code = ExitCode::for_envelope(&error);
            return Ok(format_error_output(mode, &error, exit_code));
        },
    };

    let rendered = if toml {
        to_pretty_toml(&config)
    } else {
        to_pretty_json(&config)
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(error) => return Ok(format_error_output(mode, &error, ExitCode::Internal)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
            "effectiveConfig": serde_json::to_value(config.as_ref())?,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        rendered
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}
