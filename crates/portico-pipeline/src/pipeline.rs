//! The pipeline orchestrator.

use crate::{PipelineOptions, Route};
use async_trait::async_trait;
use http::StatusCode;
use portico_core::{
    error_response, keys, success_response, HandlerBinding, HandlerFault, MetadataStore,
    RequestContext, Response,
};
use portico_datatype::{scrub, DataTypeRegistry, OutputShape};
use portico_inject::{resolve_injection, InjectionConfig, PipelineRunner, ResolutionEnv, ResolverRegistry};
use portico_rules::{run_rules, RuleBook};
use std::sync::Arc;

/// Composes rules, injection resolution, handler invocation, response
/// classification, and output scrubbing.
///
/// A pipeline is constructed once at startup from the frozen registries and
/// shared for the life of the process; it holds no per-request state.
/// [`run_route`](Self::run_route) never errors — every exit path is
/// classified into a canonical [`Response`].
pub struct Pipeline {
    metadata: Arc<MetadataStore>,
    resolvers: Arc<ResolverRegistry>,
    data_types: Arc<DataTypeRegistry>,
    rule_book: Arc<dyn RuleBook>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Creates a pipeline over the frozen registries.
    #[must_use]
    pub fn new(
        metadata: Arc<MetadataStore>,
        resolvers: Arc<ResolverRegistry>,
        data_types: Arc<DataTypeRegistry>,
        rule_book: Arc<dyn RuleBook>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            metadata,
            resolvers,
            data_types,
            rule_book,
            options,
        }
    }

    /// Runs the full pipeline for a route and returns the classified
    /// response.
    pub async fn run_route(&self, route: &Route, ctx: &RequestContext) -> Response {
        tracing::debug!(
            request_id = %ctx.request_id(),
            method = %route.method(),
            path = route.path(),
            "dispatching route"
        );
        self.run(route.binding(), ctx, 0).await
    }

    /// Runs the stages for one handler at the given resolver depth.
    async fn run(&self, binding: &HandlerBinding, ctx: &RequestContext, depth: usize) -> Response {
        let key = binding.key();

        // Rules gate the pipeline: no resolver starts until all have passed.
        let rule_lists = self
            .metadata
            .get_cloned::<Vec<Vec<String>>>(keys::RULES, key)
            .unwrap_or_default();
        if let Err(response) = run_rules(self.rule_book.as_ref(), &rule_lists, ctx).await {
            return response;
        }

        let configs = self
            .metadata
            .get_cloned::<Vec<InjectionConfig>>(keys::INJECTION, key)
            .unwrap_or_default();
        let env = ResolutionEnv::new(
            self,
            &self.resolvers,
            depth,
            self.options.max_resolver_depth,
        );
        let args = match resolve_injection(&configs, binding, ctx, &env).await {
            Ok(args) => args,
            Err(response) => return response,
        };

        let mut response = match binding.callable().call(args, ctx).await {
            Ok(value) => success_response(value, self.default_code(keys::RESPONSE_CODE, key)),
            Err(fault) => self.classify_fault(fault, key),
        };

        if response.is_success() {
            if let Some(shape) = self.metadata.get::<OutputShape>(keys::RESPONSE_SHAPE, key) {
                if let Some(data) = response.data_mut() {
                    scrub(data, shape, &self.data_types);
                }
            }
        }

        response
    }

    fn classify_fault(&self, fault: HandlerFault, key: &portico_core::HandlerKey) -> Response {
        let response = error_response(fault, self.default_code(keys::ERROR_CODE, key));
        tracing::debug!(handler = %key, status = %response.status(), "handler fault classified");
        response
    }

    fn default_code(&self, metadata_key: &str, key: &portico_core::HandlerKey) -> Option<StatusCode> {
        self.metadata.get_cloned::<StatusCode>(metadata_key, key)
    }
}

#[async_trait]
impl PipelineRunner for Pipeline {
    async fn run_handler(
        &self,
        binding: &HandlerBinding,
        ctx: &RequestContext,
        depth: usize,
    ) -> Response {
        self.run(binding, ctx, depth).await
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("resolvers", &self.resolvers)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RouteMethod, RouteTable};
    use portico_core::{FnHandler, HandlerKey, HandlerValue};
    use portico_rules::StaticRuleBook;
    use serde_json::json;

    fn pipeline(metadata: MetadataStore) -> Pipeline {
        Pipeline::new(
            Arc::new(metadata),
            Arc::new(ResolverRegistry::new()),
            Arc::new(DataTypeRegistry::with_builtins()),
            Arc::new(StaticRuleBook::new()),
            PipelineOptions::default(),
        )
    }

    fn route(table: &mut RouteTable, binding: HandlerBinding) {
        table.register(RouteMethod::Get, "/test", binding);
    }

    #[tokio::test]
    async fn test_void_handler_classifies_as_no_content() {
        let handler = FnHandler::new(vec![], |_args, _ctx| async { Ok(HandlerValue::Void) });
        let binding = HandlerBinding::new(HandlerKey::new("T", "void"), Arc::new(handler));

        let mut table = RouteTable::new();
        route(&mut table, binding);
        let pipeline = pipeline(MetadataStore::new());

        let response = pipeline
            .run_route(table.get(RouteMethod::Get, "/test").unwrap(), &RequestContext::mock())
            .await;
        assert_eq!(response, Response::no_content());
    }

    #[tokio::test]
    async fn test_plain_value_classifies_as_ok() {
        let handler = FnHandler::new(vec![], |_args, _ctx| async {
            Ok(HandlerValue::Value(json!({"id": 1})))
        });
        let binding = HandlerBinding::new(HandlerKey::new("T", "value"), Arc::new(handler));

        let mut table = RouteTable::new();
        route(&mut table, binding);
        let pipeline = pipeline(MetadataStore::new());

        let response = pipeline
            .run_route(table.get(RouteMethod::Get, "/test").unwrap(), &RequestContext::mock())
            .await;
        assert_eq!(response, Response::ok(json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_declared_response_code_applies() {
        let key = HandlerKey::new("T", "create");
        let handler = FnHandler::new(vec![], |_args, _ctx| async {
            Ok(HandlerValue::Value(json!("made")))
        });
        let binding = HandlerBinding::new(key.clone(), Arc::new(handler));

        let mut metadata = MetadataStore::new();
        metadata.define(keys::RESPONSE_CODE, &key, StatusCode::CREATED);

        let mut table = RouteTable::new();
        route(&mut table, binding);
        let pipeline = pipeline(metadata);

        let response = pipeline
            .run_route(table.get(RouteMethod::Get, "/test").unwrap(), &RequestContext::mock())
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_fault_classifies_as_500_with_diagnostic() {
        let handler = FnHandler::new(vec![], |_args, _ctx| async {
            Err(HandlerFault::Error(anyhow::anyhow!("it broke")))
        });
        let binding = HandlerBinding::new(HandlerKey::new("T", "boom"), Arc::new(handler));

        let mut table = RouteTable::new();
        route(&mut table, binding);
        let pipeline = pipeline(MetadataStore::new());

        let response = pipeline
            .run_route(table.get(RouteMethod::Get, "/test").unwrap(), &RequestContext::mock())
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.data().and_then(|d| d.as_str()).unwrap_or_default();
        assert!(detail.contains("it broke"));
    }

    #[tokio::test]
    async fn test_explicit_response_passes_through() {
        let handler = FnHandler::new(vec![], |_args, _ctx| async {
            Ok(HandlerValue::Response(Response::redirect("/elsewhere")))
        });
        let binding = HandlerBinding::new(HandlerKey::new("T", "redir"), Arc::new(handler));

        let mut table = RouteTable::new();
        route(&mut table, binding);
        let pipeline = pipeline(MetadataStore::new());

        let response = pipeline
            .run_route(table.get(RouteMethod::Get, "/test").unwrap(), &RequestContext::mock())
            .await;
        assert!(response.is_redirect());
    }
}
