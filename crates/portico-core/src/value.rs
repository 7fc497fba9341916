//! Argument value model.
//!
//! Resolvers produce raw [`serde_json::Value`]s; the injection engine
//! normalizes them into [`ArgValue`]s according to each handler's declared
//! [`ParamType`] signature. This module holds both sides of that exchange,
//! along with the boxed [`Integer`] type and the date parsing used by the
//! `date` coercion branch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The declared type of a single handler parameter.
///
/// The injection engine switches on this tag when normalizing a resolved
/// value, so the coercion policy stays a closed, exhaustively-matched set.
/// Parameters with no meaningful declared type use [`ParamType::Any`], which
/// passes resolved values through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Stringify the resolved value unconditionally.
    String,
    /// Parse as a floating-point number; non-numeric values are bad-type.
    Number,
    /// Parse as a number, then floor-truncate into a boxed [`Integer`].
    Integer,
    /// Truthiness coercion with explicit `"true"`/`"false"` string handling.
    Boolean,
    /// Pass through object-shaped values; anything else is bad-type.
    Object,
    /// Pass through array-shaped values; anything else is bad-type.
    Array,
    /// Parse string values as dates; non-strings pass through unvalidated.
    Date,
    /// No coercion; the resolved value passes through unchanged.
    Any,
}

impl ParamType {
    /// Returns the type name used in bad-type diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Date => "date",
            Self::Any => "any",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A boxed integer value.
///
/// Mirrors the domain-specific integer box used in declared signatures:
/// construction floor-truncates, so `Integer::from_f64(42.9)` holds `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Integer(i64);

impl Integer {
    /// Creates an integer from an `i64`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Creates an integer by floor-truncating a float.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self(value.floor() as i64)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Integer> for i64 {
    fn from(value: Integer) -> Self {
        value.0
    }
}

/// A normalized argument value, ready to be passed to a handler.
///
/// This is the output of the injection engine's type normalization step.
/// Composite values keep their JSON representation; dates and integers are
/// boxed into their typed forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// An absent value; passes through coercion unchanged.
    Null,
    /// A boolean.
    Bool(bool),
    /// A floating-point number.
    Number(f64),
    /// A boxed integer.
    Integer(Integer),
    /// A string.
    String(String),
    /// A JSON array.
    Array(Vec<Value>),
    /// A JSON object.
    Object(Map<String, Value>),
    /// A parsed UTC date.
    Date(DateTime<Utc>),
}

impl ArgValue {
    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boxed integer content, if this is an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the date content, if this is a date.
    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns `true` for [`ArgValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts back into a JSON value.
    ///
    /// Dates become RFC 3339 strings; integers become JSON numbers. Floats
    /// that JSON cannot represent (NaN, infinities) become null.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
            Self::Integer(i) => Value::Number(i.value().into()),
            Self::String(s) => Value::String(s),
            Self::Array(items) => Value::Array(items),
            Self::Object(map) => Value::Object(map),
            Self::Date(d) => Value::String(d.to_rfc3339()),
        }
    }
}

impl From<Value> for ArgValue {
    /// Wraps a raw JSON value without coercion.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Object(map),
        }
    }
}

/// Returns the runtime type name of a JSON value, for diagnostics.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Date and date-time layouts accepted in addition to RFC 3339.
const DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parses a date or date-time string into a UTC timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, and day-first date layouts with
/// `/`, `-`, or `.` separators. Date-only inputs land on midnight UTC.
///
/// # Example
///
/// ```
/// use portico_core::parse_datetime;
///
/// assert!(parse_datetime("2023-05-01").is_some());
/// assert!(parse_datetime("2023-05-01T10:30:00Z").is_some());
/// assert!(parse_datetime("not-a-date").is_none());
/// ```
#[must_use]
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, layout) {
            return Some(parsed.and_utc());
        }
    }

    for layout in DATE_LAYOUTS {
        if let Ok(parsed) = NaiveDate::parse_from_str(input, layout) {
            return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
