//! # Portico Pipeline
//!
//! The route table and the pipeline orchestrator.
//!
//! The orchestrator composes the stages every dispatch flows through, in a
//! fixed order that cannot be reordered:
//!
//! ```text
//! Request → Rules → Injection Resolution → Handler
//!                                             ↓
//! Response ← Scrubbing ← Classification ←────┘
//! ```
//!
//! Rules gate the pipeline: injection resolution does not start until every
//! declared rule has passed. Every exit path — explicit response, plain
//! value, thrown fault, rule failure, resolver rejection — converges through
//! the classification funnel into a canonical
//! [`Response`](portico_core::Response).

#![doc(html_root_url = "https://docs.rs/portico-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;
mod route;

pub use config::{PipelineOptions, DEFAULT_MAX_RESOLVER_DEPTH};
pub use pipeline::Pipeline;
pub use route::{Route, RouteMethod, RouteTable};
