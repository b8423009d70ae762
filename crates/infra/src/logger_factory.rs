//! Logger chain selection and assembly.

use fieldlog_adapters::{JsonLogger, LogSink, TextLogger, TracingLogger};
use fieldlog_config::{LogFormat, LoggingConfig};
use fieldlog_core::{Hook, NopLogger, hooks, with_fields, with_hooks};
use fieldlog_ports::{Field, Logger};
use std::sync::Arc;

/// Build the logger chain described by `config`.
///
/// The backend is chosen by `format`. Hooks wrap the backend when redaction
/// or a key prefix is configured (redaction runs first, so it sees the
/// original keys). Bound fields wrap the outside, so every record carries
/// them and the hooks rewrite them like any other field.
///
/// `sink` is used by the JSON and text backends only.
pub fn build_logger(config: &LoggingConfig, sink: Arc<dyn LogSink>) -> Arc<dyn Logger> {
    let mut logger = build_backend(config, sink);

    let hook_chain = build_hooks(config);
    if !hook_chain.is_empty() {
        logger = with_hooks(logger, hook_chain);
    }

    if !config.fields.is_empty() {
        let bound = config
            .fields
            .iter()
            .map(|(key, value)| Field::string(key.as_str(), value.as_str()))
            .collect();
        logger = with_fields(logger, bound);
    }

    tracing::debug!(
        format = %config.format,
        level = %config.level,
        hooks = config.has_hooks(),
        bound_fields = config.fields.len(),
        "built logger chain"
    );
    logger
}

fn build_backend(config: &LoggingConfig, sink: Arc<dyn LogSink>) -> Arc<dyn Logger> {
    match config.format {
        LogFormat::Json => Arc::new(JsonLogger::new(sink).with_min_level(config.level)),
        LogFormat::Text => Arc::new(TextLogger::new(sink).with_min_level(config.level)),
        LogFormat::Tracing => Arc::new(TracingLogger::new()),
        LogFormat::Nop => Arc::new(NopLogger),
    }
}

fn build_hooks(config: &LoggingConfig) -> Vec<Arc<dyn Hook>> {
    let mut chain = Vec::new();
    if config.redact_secrets {
        chain.push(hooks::redact_secrets());
    }
    if let Some(prefix) = config.key_prefix.as_deref() {
        chain.push(hooks::prefix_keys(prefix));
    }
    chain
}
