//! Structured field model.
//!
//! A [`Field`] pairs a key with a [`FieldValue`] of one supported kind. The
//! set of kinds is closed: backends match on it exhaustively and never have
//! to deal with an arbitrary payload.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Shared, thread-safe error payload carried by [`FieldValue::Error`].
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// Key used by [`Field::error`].
pub const ERROR_KEY: &str = "error";

/// A value that contributes its own fields to a log record.
///
/// Use [`Field::object`] to pass a `Loggable` to a logger. Object graphs must
/// be acyclic: flattening follows nested objects without a depth bound.
pub trait Loggable: Send + Sync {
    /// Fields describing this value, in emission order.
    fn to_log(&self) -> Vec<Field>;
}

impl Loggable for Vec<Field> {
    fn to_log(&self) -> Vec<Field> {
        self.clone()
    }
}

/// Value of a structured field.
#[derive(Clone)]
pub enum FieldValue {
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Platform-width signed integer.
    ISize(isize),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Platform-width unsigned integer.
    USize(usize),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    String(String),
    /// Wall-clock timestamp.
    Time(SystemTime),
    /// Elapsed time.
    Duration(Duration),
    /// Error payload.
    Error(SharedError),
    /// Nested loggable value, expanded by [`crate::flatten_fields`].
    Object(Arc<dyn Loggable>),
}

impl FieldValue {
    /// Stable lowercase name of the value kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::ISize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::USize(_) => "usize",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Time(_) => "time",
            Self::Duration(_) => "duration",
            Self::Error(_) => "error",
            Self::Object(_) => "object",
        }
    }

    /// Returns true for nested loggable values.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(value) => write!(formatter, "I8({value})"),
            Self::I16(value) => write!(formatter, "I16({value})"),
            Self::I32(value) => write!(formatter, "I32({value})"),
            Self::I64(value) => write!(formatter, "I64({value})"),
            Self::ISize(value) => write!(formatter, "ISize({value})"),
            Self::U8(value) => write!(formatter, "U8({value})"),
            Self::U16(value) => write!(formatter, "U16({value})"),
            Self::U32(value) => write!(formatter, "U32({value})"),
            Self::U64(value) => write!(formatter, "U64({value})"),
            Self::USize(value) => write!(formatter, "USize({value})"),
            Self::F32(value) => write!(formatter, "F32({value})"),
            Self::F64(value) => write!(formatter, "F64({value})"),
            Self::Bool(value) => write!(formatter, "Bool({value})"),
            Self::String(value) => write!(formatter, "String({value:?})"),
            Self::Time(value) => write!(formatter, "Time({value:?})"),
            Self::Duration(value) => write!(formatter, "Duration({value:?})"),
            Self::Error(error) => write!(formatter, "Error({error})"),
            Self::Object(_) => formatter.write_str("Object(..)"),
        }
    }
}

/// Errors compare by their rendered message and objects by identity.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::I8(left), Self::I8(right)) => left == right,
            (Self::I16(left), Self::I16(right)) => left == right,
            (Self::I32(left), Self::I32(right)) => left == right,
            (Self::I64(left), Self::I64(right)) => left == right,
            (Self::ISize(left), Self::ISize(right)) => left == right,
            (Self::U8(left), Self::U8(right)) => left == right,
            (Self::U16(left), Self::U16(right)) => left == right,
            (Self::U32(left), Self::U32(right)) => left == right,
            (Self::U64(left), Self::U64(right)) => left == right,
            (Self::USize(left), Self::USize(right)) => left == right,
            (Self::F32(left), Self::F32(right)) => left == right,
            (Self::F64(left), Self::F64(right)) => left == right,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Time(left), Self::Time(right)) => left == right,
            (Self::Duration(left), Self::Duration(right)) => left == right,
            (Self::Error(left), Self::Error(right)) => left.to_string() == right.to_string(),
            (Self::Object(left), Self::Object(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

/// A structured key/value log datum.
///
/// Fields are only built through the typed constructors, which pin the value
/// to a supported kind:
///
/// ```
/// use fieldlog_ports::Field;
///
/// let field = Field::string("user", "ada");
/// assert_eq!(field.key(), "user");
/// ```
///
/// Building one from raw parts does not compile:
///
/// ```compile_fail
/// use fieldlog_ports::{Field, FieldValue};
///
/// let field = Field { key: "user".to_string(), value: FieldValue::I64(1) };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    fn with(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Signed 8-bit integer field.
    pub fn i8(key: impl Into<String>, value: i8) -> Self {
        Self::with(key, FieldValue::I8(value))
    }

    /// Signed 16-bit integer field.
    pub fn i16(key: impl Into<String>, value: i16) -> Self {
        Self::with(key, FieldValue::I16(value))
    }

    /// Signed 32-bit integer field.
    pub fn i32(key: impl Into<String>, value: i32) -> Self {
        Self::with(key, FieldValue::I32(value))
    }

    /// Signed 64-bit integer field.
    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self::with(key, FieldValue::I64(value))
    }

    /// Platform-width signed integer field.
    pub fn isize(key: impl Into<String>, value: isize) -> Self {
        Self::with(key, FieldValue::ISize(value))
    }

    /// Unsigned 8-bit integer field.
    pub fn u8(key: impl Into<String>, value: u8) -> Self {
        Self::with(key, FieldValue::U8(value))
    }

    /// Unsigned 16-bit integer field.
    pub fn u16(key: impl Into<String>, value: u16) -> Self {
        Self::with(key, FieldValue::U16(value))
    }

    /// Unsigned 32-bit integer field.
    pub fn u32(key: impl Into<String>, value: u32) -> Self {
        Self::with(key, FieldValue::U32(value))
    }

    /// Unsigned 64-bit integer field.
    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Self::with(key, FieldValue::U64(value))
    }

    /// Platform-width unsigned integer field, for lengths and counts.
    pub fn usize(key: impl Into<String>, value: usize) -> Self {
        Self::with(key, FieldValue::USize(value))
    }

    /// 32-bit float field.
    pub fn f32(key: impl Into<String>, value: f32) -> Self {
        Self::with(key, FieldValue::F32(value))
    }

    /// 64-bit float field.
    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Self::with(key, FieldValue::F64(value))
    }

    /// Boolean field.
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::with(key, FieldValue::Bool(value))
    }

    /// String field.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with(key, FieldValue::String(value.into()))
    }

    /// Timestamp field.
    pub fn time(key: impl Into<String>, value: SystemTime) -> Self {
        Self::with(key, FieldValue::Time(value))
    }

    /// Duration field.
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::with(key, FieldValue::Duration(value))
    }

    /// Error field under the [`ERROR_KEY`] key.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::shared_error(Arc::new(error))
    }

    /// Error field from an already shared error.
    pub fn shared_error(error: SharedError) -> Self {
        Self::with(ERROR_KEY, FieldValue::Error(error))
    }

    /// Anonymous field carrying a nested loggable value.
    pub fn object<L>(loggable: L) -> Self
    where
        L: Loggable + 'static,
    {
        Self::shared_object(Arc::new(loggable))
    }

    /// Anonymous field from an already shared loggable value.
    pub fn shared_object(loggable: Arc<dyn Loggable>) -> Self {
        Self::with(String::new(), FieldValue::Object(loggable))
    }

    /// Field key (empty for object fields).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field value.
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Mutable access to the key, for hooks rewriting fields in place.
    pub const fn key_mut(&mut self) -> &mut String {
        &mut self.key
    }

    /// Replace the key.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Mutable access to the value, for hooks rewriting fields in place.
    pub const fn value_mut(&mut self) -> &mut FieldValue {
        &mut self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    /// Split the field into key and value.
    #[must_use]
    pub fn into_parts(self) -> (String, FieldValue) {
        (self.key, self.value)
    }
}
