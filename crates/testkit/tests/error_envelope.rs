//! Integration tests for shared error propagation.

use fieldlog_ports::{Field, FieldValue, Logger};
use fieldlog_shared::{ErrorCode, ErrorKind};
use fieldlog_testkit::SpyLogger;
use fieldlog_testkit::errors::{hook_error, invalid_input_error, sink_error};

#[test]
fn error_envelope_crosses_crates() {
    let sink = sink_error();
    assert_eq!(sink.code, ErrorCode::io());
    assert!(sink.class.is_retriable());

    let boxed: Box<dyn std::error::Error> = Box::new(sink);
    assert!(boxed.to_string().contains("sink unavailable"));

    assert_eq!(invalid_input_error().kind, ErrorKind::Expected);
}

#[test]
fn envelopes_travel_as_error_fields() {
    let spy = SpyLogger::new();
    spy.error("failed", vec![Field::error(hook_error())]);

    let calls = spy.calls();
    let field = calls.first().and_then(|call| call.fields.first());
    assert_eq!(field.map(Field::key), Some("error"));
    assert!(matches!(
        field.map(Field::value),
        Some(FieldValue::Error(error)) if error.to_string().ends_with("hook failed")
    ));
}
