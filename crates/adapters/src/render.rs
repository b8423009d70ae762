//! Rendering of field values for backend adapters.
//!
//! Adapters flatten first and render each leaf value through this module, so
//! every backend agrees on how times, durations, and errors look.

use fieldlog_ports::{Field, FieldValue};
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Render a flattened value as JSON.
///
/// Non-finite floats become `null`. Times are milliseconds since the Unix
/// epoch and durations are milliseconds.
///
/// # Panics
///
/// Panics on [`FieldValue::Object`]: objects must be flattened before they
/// reach a backend.
pub fn to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::I8(value) => Value::from(*value),
        FieldValue::I16(value) => Value::from(*value),
        FieldValue::I32(value) => Value::from(*value),
        FieldValue::I64(value) => Value::from(*value),
        FieldValue::ISize(value) => Value::from(*value),
        FieldValue::U8(value) => Value::from(*value),
        FieldValue::U16(value) => Value::from(*value),
        FieldValue::U32(value) => Value::from(*value),
        FieldValue::U64(value) => Value::from(*value),
        FieldValue::USize(value) => Value::from(*value),
        FieldValue::F32(value) => finite_or_null(f64::from(*value)),
        FieldValue::F64(value) => finite_or_null(*value),
        FieldValue::Bool(value) => Value::Bool(*value),
        FieldValue::String(value) => Value::String(value.clone()),
        FieldValue::Time(value) => Value::from(epoch_millis(*value)),
        FieldValue::Duration(value) => Value::from(duration_millis(*value)),
        FieldValue::Error(error) => Value::String(error.to_string()),
        FieldValue::Object(_) => unflattened(),
    }
}

/// Render a flattened value as plain text.
///
/// # Panics
///
/// Panics on [`FieldValue::Object`], like [`to_json`].
pub fn to_text(value: &FieldValue) -> String {
    match value {
        FieldValue::I8(value) => value.to_string(),
        FieldValue::I16(value) => value.to_string(),
        FieldValue::I32(value) => value.to_string(),
        FieldValue::I64(value) => value.to_string(),
        FieldValue::ISize(value) => value.to_string(),
        FieldValue::U8(value) => value.to_string(),
        FieldValue::U16(value) => value.to_string(),
        FieldValue::U32(value) => value.to_string(),
        FieldValue::U64(value) => value.to_string(),
        FieldValue::USize(value) => value.to_string(),
        FieldValue::F32(value) => value.to_string(),
        FieldValue::F64(value) => value.to_string(),
        FieldValue::Bool(value) => value.to_string(),
        FieldValue::String(value) => value.clone(),
        FieldValue::Time(value) => epoch_millis(*value).to_string(),
        FieldValue::Duration(value) => format!("{}ms", duration_millis(*value)),
        FieldValue::Error(error) => error.to_string(),
        FieldValue::Object(_) => unflattened(),
    }
}

/// Render flattened fields as space-separated `k=v` pairs.
///
/// Values that are empty or contain whitespace, quotes, or `=` are quoted,
/// so the list splits back into pairs unambiguously.
///
/// # Panics
///
/// Panics on an object field, like [`to_json`].
pub fn to_pairs(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| {
            let value = to_text(field.value());
            format!("{}={}", field.key(), quote_if_needed(&value))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Debug-quote `value` when it would be ambiguous inside a `k=v` list.
pub fn quote_if_needed(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || ch == '"' || ch == '=');
    if needs_quotes {
        format!("{value:?}")
    } else {
        value.to_string()
    }
}

/// Milliseconds since the Unix epoch; times before the epoch clamp to 0.
pub fn epoch_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .map_or(0, duration_millis)
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> u64 {
    epoch_millis(SystemTime::now())
}

fn finite_or_null(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn unflattened() -> ! {
    unreachable!("object field reached a backend without being flattened")
}
