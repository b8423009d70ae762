//! Emit command handler.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, format_error_output, log_info};
use fieldlog_adapters::StderrLogSink;
use fieldlog_config::{LogFormat, load_logging_config_std_env};
use fieldlog_infra::{build_logger, init_tracing};
use fieldlog_ports::{Field, Level};
use std::path::Path;
use std::sync::Arc;

/// Input for the emit command.
pub struct EmitCommandInput<'a> {
    pub level: Level,
    pub message: &'a str,
    pub fields: &'a [String],
    pub config: Option<&'a Path>,
}

/// Run the emit command: log one record through the configured chain.
pub fn run_emit(mode: OutputMode, input: &EmitCommandInput<'_>) -> Result<CliOutput, CliError> {
    let fields = parse_fields(input.fields)?;
    let field_count = fields.len();

    let config = match load_logging_config_std_env(input.config) {
        Ok(config) => config,
        Err(error) => {
            let exit_code = ExitCode::for_envelope(&error);
            return Ok(format_error_output(mode, &error, exit_code));
        },
    };

    if config.format == LogFormat::Tracing {
        init_tracing(config.level);
    }
    let logger = build_logger(&config, Arc::new(StderrLogSink));
    logger.log(input.level, input.message, fields);

    let mut stderr = String::new();
    log_info(&mut stderr, "emit completed", mode.no_progress);

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "format": config.format.as_str(),
            "level": input.level.as_str(),
            "fieldCount": field_count,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        "status: ok\n".to_string()
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}

fn parse_fields(raw: &[String]) -> Result<Vec<Field>, CliError> {
    raw.iter().map(|pair| parse_field(pair)).collect()
}

/// Parse `key=value`; the value becomes a bool, an i64, a finite f64, or a
/// string, in that order.
fn parse_field(pair: &str) -> Result<Field, CliError> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CliError::InvalidInput(format!(
            "field `{pair}` must have the form key=value"
        )));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "field `{pair}` has an empty key"
        )));
    }

    if let Ok(flag) = value.parse::<bool>() {
        return Ok(Field::bool(key, flag));
    }
    if let Ok(number) = value.parse::<i64>() {
        return Ok(Field::i64(key, number));
    }
    if let Ok(number) = value.parse::<f64>()
        && number.is_finite()
    {
        return Ok(Field::f64(key, number));
    }
    Ok(Field::string(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlog_ports::FieldValue;

    #[test]
    fn values_are_typed_in_order() -> Result<(), CliError> {
        assert_eq!(parse_field("ok=true")?.value(), &FieldValue::Bool(true));
        assert_eq!(parse_field("n=-3")?.value(), &FieldValue::I64(-3));
        assert_eq!(parse_field("ratio=0.5")?.value(), &FieldValue::F64(0.5));
        assert_eq!(
            parse_field("who=ada lovelace")?.value(),
            &FieldValue::String("ada lovelace".into())
        );
        assert_eq!(parse_field("x=inf")?.value(), &FieldValue::String("inf".into()));
        Ok(())
    }

    #[test]
    fn value_may_contain_equals_and_be_empty() -> Result<(), CliError> {
        let field = parse_field("query=a=b")?;
        assert_eq!(field.key(), "query");
        assert_eq!(field.value(), &FieldValue::String("a=b".into()));
        assert_eq!(parse_field("blank=")?.value(), &FieldValue::String(String::new()));
        Ok(())
    }

    #[test]
    fn malformed_pairs_are_invalid_input() {
        for raw in ["novalue", "=1", " =x"] {
            let error = parse_field(raw).err();
            assert!(
                matches!(error, Some(CliError::InvalidInput(_))),
                "{raw} should be rejected"
            );
        }
    }
}
