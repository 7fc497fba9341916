//! The canonical response model.
//!
//! Every pipeline exit path converges to a [`Response`]: a status code plus
//! an optional payload. Classification (success, redirect, error) is derived
//! from the status code, never stored.
//!
//! # Wire shape
//!
//! At the pipeline boundary a response serializes as
//! `{"statusCode": 200, "data": ...}`, with `data` omitted entirely for
//! no-content responses.

use http::StatusCode;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A canonical pipeline result: a status code and an optional payload.
///
/// # Example
///
/// ```
/// use portico_core::Response;
/// use serde_json::json;
///
/// let response = Response::ok(json!({"id": 1}));
/// assert!(response.is_success());
///
/// let missing = Response::not_found("no such user");
/// assert!(missing.is_error());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    data: Option<Value>,
}

impl Response {
    /// Creates a response with an explicit status code and payload.
    #[must_use]
    pub fn new(status: StatusCode, data: impl Into<Value>) -> Self {
        Self {
            status,
            data: Some(data.into()),
        }
    }

    /// Creates a response with a status code and no payload.
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self { status, data: None }
    }

    /// 200 OK.
    #[must_use]
    pub fn ok(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::OK, data)
    }

    /// 201 Created.
    #[must_use]
    pub fn created(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    /// 202 Accepted.
    #[must_use]
    pub fn accepted(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::ACCEPTED, data)
    }

    /// 204 No Content. Carries no payload.
    #[must_use]
    pub const fn no_content() -> Self {
        Self::empty(StatusCode::NO_CONTENT)
    }

    /// 301 Moved Permanently, carrying the new location.
    #[must_use]
    pub fn moved(url: impl Into<String>) -> Self {
        Self::new(StatusCode::MOVED_PERMANENTLY, url.into())
    }

    /// 307 Temporary Redirect, carrying the temporary location.
    #[must_use]
    pub fn redirect(url: impl Into<String>) -> Self {
        Self::new(StatusCode::TEMPORARY_REDIRECT, url.into())
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, data)
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, data)
    }

    /// 402 Payment Required.
    #[must_use]
    pub fn payment_required(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::PAYMENT_REQUIRED, data)
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::FORBIDDEN, data)
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::NOT_FOUND, data)
    }

    /// 405 Method Not Allowed.
    #[must_use]
    pub fn method_not_allowed(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, data)
    }

    /// 406 Not Acceptable.
    #[must_use]
    pub fn not_acceptable(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::NOT_ACCEPTABLE, data)
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::CONFLICT, data)
    }

    /// 410 Gone.
    #[must_use]
    pub fn gone(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::GONE, data)
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal_error(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, data)
    }

    /// 501 Not Implemented.
    #[must_use]
    pub fn not_implemented(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED, data)
    }

    /// 502 Bad Gateway.
    #[must_use]
    pub fn bad_gateway(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, data)
    }

    /// 503 Service Unavailable.
    #[must_use]
    pub fn service_unavailable(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, data)
    }

    /// 504 Gateway Timeout.
    #[must_use]
    pub fn gateway_timeout(data: impl Into<Value>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, data)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns a mutable reference to the payload, if any.
    pub fn data_mut(&mut self) -> Option<&mut Value> {
        self.data.as_mut()
    }

    /// Consumes the response and returns its payload, `Null` when absent.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }

    /// Returns `true` for status codes in `200..=299`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns `true` for status codes in `300..=399`.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Returns `true` for status codes `>= 400`.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.data.is_some() { 2 } else { 1 };
        let mut state = serializer.serialize_struct("Response", fields)?;
        state.serialize_field("statusCode", &self.status.as_u16())?;
        if let Some(data) = &self.data {
            state.serialize_field("data", data)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire {
            status_code: u16,
            #[serde(default)]
            data: Option<Value>,
        }

        let wire = Wire::deserialize(deserializer)?;
        let status = StatusCode::from_u16(wire.status_code)
            .map_err(|_| D::Error::custom(format!("invalid status code {}", wire.status_code)))?;
        Ok(Self {
            status,
            data: wire.data,
        })
    }
}
