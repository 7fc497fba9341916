//! Named-resource resolver strategy.
//!
//! A resource injection binds a parameter to a resolver *name*. At
//! resolution time this strategy looks the name up in the
//! [`ResolverRegistry`](crate::ResolverRegistry) and re-enters the full
//! pipeline (rules, injection, classification) for the bound handler,
//! against the same request context. The sub-pipeline's classified response
//! becomes this injectable's resolved value; an error response propagates as
//! this resolver's rejection.
//!
//! Resolvers may themselves inject resources, so chains nest. Recursion is
//! bounded: once the environment's depth reaches the configured maximum the
//! strategy fails closed with a 508 Loop Detected response instead of
//! re-entering.

use crate::{Injectable, Resolved, ResolutionEnv, ResolveStrategy};
use async_trait::async_trait;
use http::StatusCode;
use portico_core::{RequestContext, Response};

/// Resolves an injectable by running the named resolver's pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceResolver;

impl ResourceResolver {
    /// Creates a resource resolver strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResolveStrategy for ResourceResolver {
    async fn resolve(
        &self,
        injectable: &Injectable,
        ctx: &RequestContext,
        env: &ResolutionEnv<'_>,
    ) -> Result<Resolved, Response> {
        let name = injectable.first_argument_str().ok_or_else(|| {
            Response::internal_error("resource injection is missing a resolver name")
        })?;

        let binding = env.resolvers().lookup(name).ok_or_else(|| {
            tracing::error!(resolver = %name, "resolver is not registered");
            Response::internal_error(format!("no resolver registered under the name '{name}'"))
        })?;

        if env.depth() >= env.max_depth() {
            tracing::warn!(resolver = %name, depth = env.depth(), "resolver nesting limit reached");
            return Err(Response::new(
                StatusCode::LOOP_DETECTED,
                format!(
                    "resolver nesting exceeded the maximum depth of {} while resolving '{name}'",
                    env.max_depth()
                ),
            ));
        }

        let response = env.runner().run_handler(binding, ctx, env.depth() + 1).await;

        if response.is_error() {
            Err(response)
        } else {
            Ok(Resolved::Response(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PipelineRunner, ResolverRegistry};
    use portico_core::{FnHandler, HandlerBinding, HandlerKey, HandlerValue};
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Runner that classifies every sub-pipeline as a fixed response.
    struct FixedRunner(Response);

    #[async_trait]
    impl PipelineRunner for FixedRunner {
        async fn run_handler(
            &self,
            _binding: &HandlerBinding,
            _ctx: &RequestContext,
            _depth: usize,
        ) -> Response {
            self.0.clone()
        }
    }

    fn registry_with(name: &str) -> ResolverRegistry {
        let mut registry = ResolverRegistry::new();
        let handler = FnHandler::new(vec![], |_args, _ctx| async { Ok(HandlerValue::Void) });
        registry.register(
            name,
            HandlerBinding::new(HandlerKey::new("Resolvers", name), Arc::new(handler)),
        );
        registry
    }

    fn injectable(name: &str) -> Injectable {
        Injectable::new(0, vec![Value::String(name.into())])
    }

    #[tokio::test]
    async fn test_resolves_with_sub_pipeline_response() {
        let runner = FixedRunner(Response::ok(json!({"user": "alice"})));
        let registry = registry_with("current-user");
        let env = ResolutionEnv::new(&runner, &registry, 0, 8);

        let resolved = ResourceResolver::new()
            .resolve(&injectable("current-user"), &RequestContext::mock(), &env)
            .await
            .expect("should resolve");

        assert_eq!(resolved.into_raw(), json!({"user": "alice"}));
    }

    #[tokio::test]
    async fn test_sub_pipeline_error_propagates_as_rejection() {
        let runner = FixedRunner(Response::unauthorized("Unauthorized"));
        let registry = registry_with("current-user");
        let env = ResolutionEnv::new(&runner, &registry, 0, 8);

        let rejection = ResourceResolver::new()
            .resolve(&injectable("current-user"), &RequestContext::mock(), &env)
            .await
            .unwrap_err();

        assert_eq!(rejection, Response::unauthorized("Unauthorized"));
    }

    #[tokio::test]
    async fn test_unknown_name_is_distinguishable_from_bad_type() {
        let runner = FixedRunner(Response::no_content());
        let registry = ResolverRegistry::new();
        let env = ResolutionEnv::new(&runner, &registry, 0, 8);

        let rejection = ResourceResolver::new()
            .resolve(&injectable("ghost"), &RequestContext::mock(), &env)
            .await
            .unwrap_err();

        // Not-found is a 500-class config failure, never a 400 bad-type.
        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = rejection.data().and_then(|d| d.as_str()).unwrap_or_default();
        assert!(detail.contains("ghost"));
        assert!(detail.contains("no resolver registered"));
    }

    #[tokio::test]
    async fn test_depth_limit_fails_closed() {
        let runner = FixedRunner(Response::no_content());
        let registry = registry_with("self-referential");
        let env = ResolutionEnv::new(&runner, &registry, 8, 8);

        let rejection = ResourceResolver::new()
            .resolve(&injectable("self-referential"), &RequestContext::mock(), &env)
            .await
            .unwrap_err();

        assert_eq!(rejection.status(), StatusCode::LOOP_DETECTED);
    }

    #[tokio::test]
    async fn test_missing_name_argument_rejects() {
        let runner = FixedRunner(Response::no_content());
        let registry = ResolverRegistry::new();
        let env = ResolutionEnv::new(&runner, &registry, 0, 8);

        let rejection = ResourceResolver::new()
            .resolve(&Injectable::new(0, vec![]), &RequestContext::mock(), &env)
            .await
            .unwrap_err();

        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
