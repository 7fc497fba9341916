//! Built-in type descriptors.
//!
//! These mirror the casting behavior of the injection engine's declared-type
//! branches, exposed as probeable descriptors. The string descriptor accepts
//! every non-composite value; see the registry docs for the ordering hazard
//! this creates.

use crate::DataType;
use portico_core::{parse_datetime, ArgValue, Integer};
use serde_json::Value;

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Casts any non-composite value to a string.
pub struct StringDataType;

impl DataType for StringDataType {
    fn name(&self) -> &'static str {
        "string"
    }

    fn can_cast(&self, value: &Value) -> bool {
        !matches!(value, Value::Object(_) | Value::Array(_))
    }

    fn cast(&self, value: &Value) -> ArgValue {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ArgValue::String(text)
    }
}

/// Casts numbers and numeric strings to a float.
pub struct NumberDataType;

impl DataType for NumberDataType {
    fn name(&self) -> &'static str {
        "number"
    }

    fn can_cast(&self, value: &Value) -> bool {
        numeric(value).is_some()
    }

    fn cast(&self, value: &Value) -> ArgValue {
        numeric(value).map_or_else(|| ArgValue::from(value.clone()), ArgValue::Number)
    }
}

/// Casts numbers and numeric strings to a boxed, floor-truncated [`Integer`].
pub struct IntegerDataType;

impl DataType for IntegerDataType {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn can_cast(&self, value: &Value) -> bool {
        numeric(value).is_some()
    }

    fn cast(&self, value: &Value) -> ArgValue {
        numeric(value).map_or_else(
            || ArgValue::from(value.clone()),
            |n| ArgValue::Integer(Integer::from_f64(n)),
        )
    }
}

/// Casts date-shaped strings to a UTC timestamp.
pub struct DateDataType;

impl DataType for DateDataType {
    fn name(&self) -> &'static str {
        "date"
    }

    fn can_cast(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| parse_datetime(s).is_some())
    }

    fn cast(&self, value: &Value) -> ArgValue {
        value
            .as_str()
            .and_then(parse_datetime)
            .map_or_else(|| ArgValue::from(value.clone()), ArgValue::Date)
    }
}

/// Passes arrays through unchanged.
pub struct ArrayDataType;

impl DataType for ArrayDataType {
    fn name(&self) -> &'static str {
        "array"
    }

    fn can_cast(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn cast(&self, value: &Value) -> ArgValue {
        ArgValue::from(value.clone())
    }
}

/// Passes objects through unchanged.
pub struct ObjectDataType;

impl DataType for ObjectDataType {
    fn name(&self) -> &'static str {
        "object"
    }

    fn can_cast(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn cast(&self, value: &Value) -> ArgValue {
        ArgValue::from(value.clone())
    }
}
