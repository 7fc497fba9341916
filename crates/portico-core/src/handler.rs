//! Handler trait and handler identity types.
//!
//! Portico handlers are type-erased: the pipeline hands every handler a
//! positional array of normalized [`ArgValue`]s and receives back a
//! [`HandlerResult`], which the classification step converts into a canonical
//! [`Response`]. The declared parameter signature lives on the handler itself
//! ([`Handler::param_types`]); injection configuration registered for the
//! handler must line up with it, which is checked when the application is
//! built.

use crate::{ArgValue, ParamType, RequestContext, Response};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Identifies a handler method: a target identity plus a member name.
///
/// This is the key under which all metadata (injection configs, rules,
/// default status codes, response shapes) is stored. It replaces the
/// `(object, method)` pair a reflection-based system would use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    target: String,
    member: String,
}

impl HandlerKey {
    /// Creates a handler key from a target identity and member name.
    #[must_use]
    pub fn new(target: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            member: member.into(),
        }
    }

    /// Returns the target identity (e.g. a controller name).
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the member name.
    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.member)
    }
}

/// The raw value a handler produced on its success path.
#[derive(Debug)]
pub enum HandlerValue {
    /// An explicit canonical response; passes through classification unchanged.
    Response(Response),
    /// A plain value, wrapped by classification.
    Value(Value),
    /// No value; classifies as no-content unless a default code is declared.
    Void,
}

impl From<Response> for HandlerValue {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl From<Value> for HandlerValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// The raw value a handler (or resolver) failed with.
#[derive(Debug)]
pub enum HandlerFault {
    /// An explicit canonical response; passes through classification unchanged.
    Response(Response),
    /// An opaque error, classified as 500 carrying its diagnostic chain.
    Error(anyhow::Error),
    /// A plain rejected value, classified with the declared error code or 500.
    Value(Value),
}

impl From<Response> for HandlerFault {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl From<anyhow::Error> for HandlerFault {
    fn from(error: anyhow::Error) -> Self {
        Self::Error(error)
    }
}

/// The result of invoking a handler, before classification.
pub type HandlerResult = Result<HandlerValue, HandlerFault>;

/// A type-erased request handler.
///
/// Implementations declare their positional parameter signature through
/// [`param_types`](Self::param_types); the injection engine normalizes every
/// resolved value against it before [`call`](Self::call) runs.
///
/// # Example
///
/// ```
/// use portico_core::{ArgValue, Handler, HandlerResult, HandlerValue, ParamType, RequestContext};
/// use async_trait::async_trait;
/// use serde_json::json;
///
/// struct EchoHandler;
///
/// #[async_trait]
/// impl Handler for EchoHandler {
///     fn param_types(&self) -> &[ParamType] {
///         &[ParamType::String]
///     }
///
///     async fn call(&self, args: Vec<ArgValue>, _ctx: &RequestContext) -> HandlerResult {
///         let text = args[0].as_str().unwrap_or_default().to_string();
///         Ok(HandlerValue::Value(json!(text)))
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
    /// Returns the declared parameter types, in positional order.
    fn param_types(&self) -> &[ParamType];

    /// Invokes the handler with a fully resolved argument array.
    async fn call(&self, args: Vec<ArgValue>, ctx: &RequestContext) -> HandlerResult;
}

/// A handler together with the key its metadata is stored under.
#[derive(Clone)]
pub struct HandlerBinding {
    key: HandlerKey,
    callable: Arc<dyn Handler>,
}

impl HandlerBinding {
    /// Creates a binding from a key and a handler.
    #[must_use]
    pub fn new(key: HandlerKey, callable: Arc<dyn Handler>) -> Self {
        Self { key, callable }
    }

    /// Returns the handler key.
    #[must_use]
    pub const fn key(&self) -> &HandlerKey {
        &self.key
    }

    /// Returns the handler.
    #[must_use]
    pub fn callable(&self) -> &Arc<dyn Handler> {
        &self.callable
    }

    /// Returns the handler's declared parameter types.
    #[must_use]
    pub fn param_types(&self) -> &[ParamType] {
        self.callable.param_types()
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("key", &self.key)
            .field("arity", &self.callable.param_types().len())
            .finish()
    }
}

/// A function-based handler wrapper.
///
/// This allows using async closures directly as handlers, which is the common
/// case in tests and small applications.
///
/// # Example
///
/// ```
/// use portico_core::{FnHandler, HandlerValue, ParamType};
/// use serde_json::json;
///
/// let handler = FnHandler::new(vec![ParamType::Number], |args, _ctx| async move {
///     let n = args[0].as_f64().unwrap_or(0.0);
///     Ok(HandlerValue::Value(json!(n * 2.0)))
/// });
/// ```
pub struct FnHandler<F> {
    params: Vec<ParamType>,
    func: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Vec<ArgValue>, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Creates a handler from a declared signature and an async closure.
    #[must_use]
    pub fn new(params: Vec<ParamType>, func: F) -> Self {
        Self { params, func }
    }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Vec<ArgValue>, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn param_types(&self) -> &[ParamType] {
        &self.params
    }

    async fn call(&self, args: Vec<ArgValue>, ctx: &RequestContext) -> HandlerResult {
        (self.func)(args, ctx.clone()).await
    }
}
