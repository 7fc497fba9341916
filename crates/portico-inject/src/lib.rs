//! # Portico Inject
//!
//! The injection resolution engine and the resolver strategies it drives.
//!
//! Handlers declare, through startup-time registration, one
//! [`InjectionConfig`] per parameter. At dispatch time the engine fans out
//! every config's [`ResolveStrategy`] concurrently against the request
//! context, joins the results, normalizes each value against the handler's
//! declared parameter type, and produces the positional argument array — or
//! the first failure's canonical response.
//!
//! The [`ResourceResolver`] strategy re-enters the full pipeline for a named
//! resolver through the [`PipelineRunner`] seam, with explicit recursion
//! bounding.

#![doc(html_root_url = "https://docs.rs/portico-inject/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
mod engine;
mod extract;
mod injectable;
mod registry;
mod resource;
mod strategy;

pub use coerce::coerce;
pub use engine::resolve_injection;
pub use extract::{BodyResolver, PathResolver, QueryResolver};
pub use injectable::{Injectable, InjectionConfig};
pub use registry::ResolverRegistry;
pub use resource::ResourceResolver;
pub use strategy::{PipelineRunner, Resolved, ResolutionEnv, ResolveStrategy};
