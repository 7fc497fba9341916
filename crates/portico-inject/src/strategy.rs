//! Resolver strategy trait and resolution environment.

use crate::{Injectable, ResolverRegistry};
use async_trait::async_trait;
use portico_core::{HandlerBinding, RequestContext, Response};
use serde_json::Value;

/// The value a resolver strategy produced.
///
/// A strategy may resolve with a raw value or with a full canonical
/// [`Response`] (the named-resource strategy does the latter); the engine
/// unwraps a response to its payload before type normalization.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A raw value, used directly.
    Value(Value),
    /// A canonical response, unwrapped to its payload.
    Response(Response),
}

impl Resolved {
    /// Returns the raw value this resolution contributes to the argument
    /// array, unwrapping responses to their payload.
    #[must_use]
    pub fn into_raw(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Response(response) => response.into_data(),
        }
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Response> for Resolved {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

/// Re-entry seam into the pipeline orchestrator.
///
/// The named-resource strategy runs a sub-pipeline (rules, injection,
/// classification) for the handler a resolver name is bound to. This trait
/// breaks the structural cycle between the injection engine and the
/// orchestrator that composes it: the orchestrator implements the trait and
/// hands itself to every resolution pass through the [`ResolutionEnv`].
#[async_trait]
pub trait PipelineRunner: Send + Sync {
    /// Runs the full pipeline for `binding` at the given recursion depth and
    /// returns its classified response.
    async fn run_handler(
        &self,
        binding: &HandlerBinding,
        ctx: &RequestContext,
        depth: usize,
    ) -> Response;
}

/// Shared environment for one resolution pass.
///
/// Carries the pipeline re-entry seam, the named-resolver registry, and the
/// current recursion depth. Resolver strategies receive it by reference;
/// like the request context, it is read-only to them.
pub struct ResolutionEnv<'a> {
    runner: &'a dyn PipelineRunner,
    resolvers: &'a ResolverRegistry,
    depth: usize,
    max_depth: usize,
}

impl<'a> ResolutionEnv<'a> {
    /// Creates a resolution environment.
    #[must_use]
    pub fn new(
        runner: &'a dyn PipelineRunner,
        resolvers: &'a ResolverRegistry,
        depth: usize,
        max_depth: usize,
    ) -> Self {
        Self {
            runner,
            resolvers,
            depth,
            max_depth,
        }
    }

    /// Returns the pipeline re-entry seam.
    #[must_use]
    pub const fn runner(&self) -> &'a dyn PipelineRunner {
        self.runner
    }

    /// Returns the named-resolver registry.
    #[must_use]
    pub const fn resolvers(&self) -> &'a ResolverRegistry {
        self.resolvers
    }

    /// Returns the current resolver recursion depth (0 for a route's own
    /// resolution pass).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the configured maximum recursion depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// A capability that produces a value for an injectable from a request
/// context, possibly asynchronously.
///
/// Strategies run concurrently with their siblings and must not assume any
/// other resolver has run. A strategy fails by returning the canonical
/// [`Response`] the whole resolution should reject with.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Resolves a value for `injectable` from the request context.
    async fn resolve(
        &self,
        injectable: &Injectable,
        ctx: &RequestContext,
        env: &ResolutionEnv<'_>,
    ) -> Result<Resolved, Response>;
}
