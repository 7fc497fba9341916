//! # Portico
//!
//! **A declarative request-handling pipeline for Rust**
//!
//! Handlers declare, through startup-time registration, what arguments they
//! need (injected resources, path/query/body values), what preconditions
//! must pass (rules), and what response shape to expect. The pipeline
//! gathers heterogeneous, independently-resolved arguments, coerces them
//! into typed values, classifies every exit path into a canonical response,
//! and does all of this generically over an open set of handler signatures
//! and resolver implementations.
//!
//! ## Quick Start
//!
//! ```rust
//! use portico::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let handler = FnHandler::new(vec![ParamType::Integer], |args, _ctx| async move {
//!     let id = args[0].as_integer().map(i64::from).unwrap_or_default();
//!     Ok(HandlerValue::Value(json!({"id": id})))
//! });
//!
//! let app = App::builder()
//!     .route(RouteMethod::Get, "/users/{id}", "Users", "get", Arc::new(handler))
//!     .inject_path("Users", "get", 0, "id")
//!     .build();
//!
//! let ctx = RequestContext::new().with_param("id", "42");
//! let response = app.dispatch(RouteMethod::Get, "/users/{id}", &ctx).await;
//! assert_eq!(response, Response::ok(json!({"id": 42})));
//! # }
//! ```
//!
//! ## Architecture
//!
//! Every dispatch flows through a fixed stage order:
//!
//! ```text
//! Request → Rules → Injection Resolution → Handler
//!                                             ↓
//! Response ← Scrubbing ← Classification ←────┘
//! ```
//!
//! All registries are populated by [`AppBuilder`] during startup and frozen
//! into an immutable [`App`]; configuration defects (duplicate routes or
//! resolver names, injection configs that do not match a handler's declared
//! signature) are fatal at build time, never per-request errors.

#![doc(html_root_url = "https://docs.rs/portico/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use portico_core as core;

// Re-export the data-type registry
pub use portico_datatype as datatype;

// Re-export the rule engine
pub use portico_rules as rules;

// Re-export the injection engine
pub use portico_inject as inject;

// Re-export the pipeline orchestrator
pub use portico_pipeline as pipeline;

mod app;
mod telemetry;

pub use app::{App, AppBuilder};
pub use telemetry::init_tracing;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use portico::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{App, AppBuilder};
    pub use portico_core::{
        ArgValue, FnHandler, Handler, HandlerBinding, HandlerFault, HandlerKey, HandlerResult,
        HandlerValue, ParamType, RequestContext, RequestId, Response,
    };
    pub use portico_datatype::{DataType, DataTypeRegistry, OutputShape};
    pub use portico_inject::{
        BodyResolver, Injectable, InjectionConfig, PathResolver, QueryResolver, ResolveStrategy,
        ResourceResolver,
    };
    pub use portico_pipeline::{PipelineOptions, RouteMethod};
    pub use portico_rules::{FnRule, Rule, RuleBook, StaticRuleBook};
}
