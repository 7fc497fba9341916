//! Response classification.
//!
//! The single funnel through which every pipeline exit path is normalized
//! into a canonical [`Response`]: explicit responses pass through untouched,
//! plain values are wrapped with the handler's default status code (or the
//! generic 200/500), absent values become no-content, and opaque faults
//! become 500s carrying their diagnostic chain.

use crate::{HandlerFault, HandlerValue, Response};
use http::StatusCode;

/// Converts a handler's success-path value into a canonical response.
///
/// - An explicit [`Response`] passes through unchanged.
/// - A plain value is wrapped with `default_code` when declared, else 200.
/// - An absent value becomes an empty response with `default_code` when
///   declared, else 204 No Content.
///
/// # Example
///
/// ```
/// use portico_core::{success_response, HandlerValue, Response};
/// use serde_json::json;
///
/// let response = success_response(HandlerValue::Value(json!({"id": 1})), None);
/// assert_eq!(response, Response::ok(json!({"id": 1})));
///
/// let empty = success_response(HandlerValue::Void, None);
/// assert_eq!(empty, Response::no_content());
/// ```
#[must_use]
pub fn success_response(value: HandlerValue, default_code: Option<StatusCode>) -> Response {
    match value {
        HandlerValue::Response(response) => response,
        HandlerValue::Value(data) => match default_code {
            Some(code) => Response::new(code, data),
            None => Response::ok(data),
        },
        HandlerValue::Void => match default_code {
            Some(code) => Response::empty(code),
            None => Response::no_content(),
        },
    }
}

/// Converts a handler's or resolver's fault into a canonical response.
///
/// - An explicit [`Response`] passes through unchanged.
/// - An opaque error becomes a 500 carrying its diagnostic chain; the
///   declared default error code does not apply to opaque errors.
/// - A plain rejected value is wrapped with `default_code` when declared,
///   else 500.
#[must_use]
pub fn error_response(fault: HandlerFault, default_code: Option<StatusCode>) -> Response {
    match fault {
        HandlerFault::Response(response) => response,
        HandlerFault::Error(error) => Response::internal_error(format!("{error:?}")),
        HandlerFault::Value(data) => match default_code {
            Some(code) => Response::new(code, data),
            None => Response::internal_error(data),
        },
    }
}
