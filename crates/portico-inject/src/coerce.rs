//! Declared-type coercion.
//!
//! The type-normalization step of injection resolution. Coercion switches on
//! the handler's declared [`ParamType`] for a slot — not on the shape of the
//! resolved value — so the policy stays a closed, compiler-checked set with
//! an exhaustive bad-type fallback.

use portico_core::{json_type_name, parse_datetime, ArgValue, Integer, ParamType, Response};
use serde_json::Value;

/// Normalizes a resolved raw value against the declared parameter type.
///
/// Null values always pass through unchanged regardless of the declared
/// type. The failure branches produce a 400-class **bad-type** response
/// naming the expected type, the received runtime type, and the literal
/// offending value.
///
/// # Example
///
/// ```
/// use portico_inject::coerce;
/// use portico_core::{ArgValue, ParamType};
/// use serde_json::json;
///
/// let ok = coerce(json!("42"), ParamType::Number, 0).unwrap();
/// assert_eq!(ok, ArgValue::Number(42.0));
///
/// let bad = coerce(json!("abc"), ParamType::Number, 0).unwrap_err();
/// assert_eq!(bad.status(), http::StatusCode::BAD_REQUEST);
/// ```
pub fn coerce(raw: Value, declared: ParamType, index: usize) -> Result<ArgValue, Response> {
    if raw.is_null() {
        return Ok(ArgValue::Null);
    }

    match declared {
        ParamType::Any => Ok(ArgValue::from(raw)),

        ParamType::String => Ok(ArgValue::String(stringify(&raw))),

        ParamType::Number => parse_number(&raw)
            .map(ArgValue::Number)
            .ok_or_else(|| bad_type(index, declared, &raw)),

        ParamType::Integer => parse_number(&raw)
            .map(|n| ArgValue::Integer(Integer::from_f64(n)))
            .ok_or_else(|| bad_type(index, declared, &raw)),

        ParamType::Boolean => Ok(ArgValue::Bool(truthiness(&raw))),

        ParamType::Object => match raw {
            Value::Object(map) => Ok(ArgValue::Object(map)),
            other => Err(bad_type(index, declared, &other)),
        },

        ParamType::Array => match raw {
            Value::Array(items) => Ok(ArgValue::Array(items)),
            other => Err(bad_type(index, declared, &other)),
        },

        ParamType::Date => match raw {
            Value::String(text) => parse_datetime(&text)
                .map(ArgValue::Date)
                .ok_or_else(|| bad_type(index, declared, &Value::String(text.clone()))),
            // Non-string values pass through without date validation.
            other => Ok(ArgValue::from(other)),
        },
    }
}

/// Stringification used by the `string` branch: strings stay themselves,
/// everything else becomes its JSON text.
fn stringify(raw: &Value) -> String {
    match raw {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Total truthiness policy for `boolean`-declared parameters.
///
/// Booleans pass through; strings compare case-insensitively against
/// `"true"`/`"false"` and otherwise fall back to non-empty truthiness;
/// numbers are truthy when non-zero; composites are always truthy.
fn truthiness(raw: &Value) -> bool {
    match raw {
        Value::Bool(b) => *b,
        Value::String(text) => {
            if text.eq_ignore_ascii_case("true") {
                true
            } else if text.eq_ignore_ascii_case("false") {
                false
            } else {
                !text.is_empty()
            }
        }
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Builds the canonical bad-type response for a coercion failure.
fn bad_type(index: usize, expected: ParamType, raw: &Value) -> Response {
    Response::bad_request(format!(
        "expected {} for parameter {}, received {}: {}",
        expected.name(),
        index,
        json_type_name(raw),
        raw
    ))
}
