//! # Portico Core
//!
//! Core types and traits for the Portico request pipeline.
//!
//! This crate provides the foundational types used throughout Portico:
//!
//! - [`RequestContext`] - Per-request context carrying path, query, and body data
//! - [`RequestId`] - UUID v7 request identifier
//! - [`Response`] - Canonical `{statusCode, data}` result with derived classification
//! - [`Handler`] - Type-erased handler trait with a declared parameter signature
//! - [`ArgValue`] / [`ParamType`] - The argument value model used by injection
//! - [`MetadataStore`] - Startup-time metadata keyed by handler identity and member
//! - [`ConfigError`] / [`fatal`] - Fatal configuration error handling

#![doc(html_root_url = "https://docs.rs/portico-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classify;
mod context;
mod error;
mod handler;
mod metadata;
mod response;
mod value;

pub use classify::{error_response, success_response};
pub use context::{RequestContext, RequestId};
pub use error::{fatal, ConfigError};
pub use handler::{FnHandler, Handler, HandlerBinding, HandlerFault, HandlerKey, HandlerResult, HandlerValue};
pub use metadata::{keys, MetadataStore};
pub use response::Response;
pub use value::{json_type_name, parse_datetime, ArgValue, Integer, ParamType};
