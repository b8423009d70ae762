//! Built-in hooks.
//!
//! Hooks run before the backend flattens the record, so a field carrying a
//! nested object cannot be rewritten directly. The built-in hooks replace the
//! object in place with a wrapper whose `to_log` flattens the original and
//! applies the same rewrite to every nested field. The field slice keeps its
//! length and order.

use crate::with_hooks::Hook;
use fieldlog_ports::{Field, FieldValue, Level, Loggable, flatten_fields};
use fieldlog_shared::{ErrorEnvelope, REDACTED, is_secret_key};
use std::sync::Arc;

/// A per-field rewrite that also reaches into nested objects.
trait FieldRewrite: Clone + Send + Sync + 'static {
    /// Rewrite one flat (non-object) field.
    fn rewrite(&self, field: &mut Field);
}

/// Object wrapper applying a [`FieldRewrite`] to the fields it produces.
struct Rewritten<R> {
    inner: Arc<dyn Loggable>,
    rewrite: R,
}

impl<R: FieldRewrite> Loggable for Rewritten<R> {
    fn to_log(&self) -> Vec<Field> {
        let mut fields = flatten_fields(self.inner.to_log());
        for field in &mut fields {
            self.rewrite.rewrite(field);
        }
        fields
    }
}

fn rewrite_all<R: FieldRewrite>(rewrite: &R, fields: &mut [Field]) {
    for field in fields {
        if let FieldValue::Object(inner) = field.value() {
            let wrapped: Arc<dyn Loggable> = Arc::new(Rewritten {
                inner: Arc::clone(inner),
                rewrite: rewrite.clone(),
            });
            field.set_value(FieldValue::Object(wrapped));
        } else {
            rewrite.rewrite(field);
        }
    }
}

/// Hook prepending a fixed prefix to every field key, nested ones included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixKeys {
    prefix: String,
}

impl PrefixKeys {
    /// Create the hook.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl FieldRewrite for PrefixKeys {
    fn rewrite(&self, field: &mut Field) {
        field.key_mut().insert_str(0, &self.prefix);
    }
}

impl Hook for PrefixKeys {
    fn run(&self, _level: Level, _message: &str, fields: &mut [Field]) -> Result<(), ErrorEnvelope> {
        rewrite_all(self, fields);
        Ok(())
    }
}

/// Hook replacing values of secret-looking keys with [`REDACTED`], nested
/// ones included.
#[derive(Debug, Default, Clone, Copy)]
pub struct RedactSecrets;

impl FieldRewrite for RedactSecrets {
    fn rewrite(&self, field: &mut Field) {
        if is_secret_key(field.key()) {
            field.set_value(FieldValue::String(REDACTED.to_string()));
        }
    }
}

impl Hook for RedactSecrets {
    fn run(&self, _level: Level, _message: &str, fields: &mut [Field]) -> Result<(), ErrorEnvelope> {
        rewrite_all(self, fields);
        Ok(())
    }
}

/// Shared [`PrefixKeys`] hook.
pub fn prefix_keys(prefix: impl Into<String>) -> Arc<dyn Hook> {
    Arc::new(PrefixKeys::new(prefix))
}

/// Shared [`RedactSecrets`] hook.
pub fn redact_secrets() -> Arc<dyn Hook> {
    Arc::new(RedactSecrets)
}
