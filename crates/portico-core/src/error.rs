//! Fatal configuration errors.
//!
//! Errors in this module are startup-time defects: a misregistered route, a
//! resolver name claimed twice, injection configuration that does not match a
//! handler's declared signature. They are never converted into per-request
//! [`Response`](crate::Response)s — an application that trips one cannot
//! correctly serve any request, so registration aborts the process through
//! [`fatal`].

use crate::HandlerKey;
use thiserror::Error;

/// A startup-time configuration defect.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The same `(method, path)` pair was registered twice.
    #[error("unable to register route {method} > {path} to {handler}: this path is already registered to {existing}")]
    DuplicateRoute {
        /// The HTTP-style method of the offending registration.
        method: String,
        /// The path of the offending registration.
        path: String,
        /// The handler that attempted the registration.
        handler: HandlerKey,
        /// The handler that already owns the route.
        existing: HandlerKey,
    },

    /// The same resolver name was registered twice.
    #[error("unable to register resolver at {handler} with the name '{name}': {existing} has already been registered with this name")]
    DuplicateResolver {
        /// The contested resolver name.
        name: String,
        /// The handler that attempted the registration.
        handler: HandlerKey,
        /// The handler that already owns the name.
        existing: HandlerKey,
    },

    /// A handler's injection configs do not cover its declared signature.
    #[error("injection configuration for {handler} does not match its declared signature: {declared} parameter(s) declared, {configured} configured")]
    InjectionArity {
        /// The misconfigured handler.
        handler: HandlerKey,
        /// The handler's declared parameter count.
        declared: usize,
        /// The number of injection configs registered for it.
        configured: usize,
    },

    /// A handler's injection configs contain a duplicate or out-of-range index.
    #[error("injection configuration for {handler} has a duplicate or out-of-range parameter index {index}")]
    InjectionIndex {
        /// The misconfigured handler.
        handler: HandlerKey,
        /// The offending index.
        index: usize,
    },
}

/// Aborts startup after a fatal configuration error.
///
/// Logs the error and panics. Configuration defects are detected while the
/// application is being registered, before any request traffic, so the panic
/// surfaces immediately at process start rather than as a request failure.
pub fn fatal(error: impl std::fmt::Display) -> ! {
    tracing::error!(%error, "fatal configuration error");
    panic!("fatal configuration error: {error}");
}
