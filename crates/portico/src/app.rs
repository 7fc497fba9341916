//! Application assembly.
//!
//! [`AppBuilder`] is the registration surface: routes, named resolvers,
//! rules, per-parameter injections, default status codes, response shapes,
//! and data-type plugins are all declared here through ordinary function
//! calls during startup. [`AppBuilder::build`] validates the configuration,
//! freezes every registry, and produces an immutable [`App`].

use http::StatusCode;
use portico_core::{
    fatal, keys, ConfigError, Handler, HandlerBinding, HandlerKey, MetadataStore, RequestContext,
    Response,
};
use portico_datatype::{DataType, DataTypeRegistry, OutputShape};
use portico_inject::{
    BodyResolver, Injectable, InjectionConfig, PathResolver, QueryResolver, ResolverRegistry,
    ResourceResolver, ResolveStrategy,
};
use portico_pipeline::{Pipeline, PipelineOptions, RouteMethod, RouteTable};
use portico_rules::{Rule, RuleBook, StaticRuleBook};
use serde_json::json;
use std::sync::Arc;

/// A fully assembled application: frozen registries plus the pipeline.
///
/// Constructed once at startup via [`App::builder`]; immutable afterwards.
/// Tests should build a fresh instance per test rather than sharing one.
pub struct App {
    routes: RouteTable,
    pipeline: Pipeline,
}

impl App {
    /// Starts building an application.
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Dispatches a request to the route registered for `(method, path)`.
    ///
    /// Returns 404 when no route matches; otherwise runs the full pipeline
    /// and returns its classified response.
    pub async fn dispatch(
        &self,
        method: RouteMethod,
        path: &str,
        ctx: &RequestContext,
    ) -> Response {
        match self.routes.get(method, path) {
            Some(route) => self.pipeline.run_route(route, ctx).await,
            None => Response::not_found(format!("no route registered for {method} {path}")),
        }
    }

    /// Returns the route table.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// The startup-time registration surface.
///
/// See the crate-level example for the common flow. Registration order is
/// free except where it is semantically load-bearing: rule tuples and
/// injection configs accumulate in call order, and data-type descriptors
/// are probed in registration order.
pub struct AppBuilder {
    metadata: MetadataStore,
    resolvers: ResolverRegistry,
    data_types: DataTypeRegistry,
    routes: RouteTable,
    rule_catalog: StaticRuleBook,
    rule_book: Option<Arc<dyn RuleBook>>,
    options: PipelineOptions,
    bindings: Vec<HandlerBinding>,
}

impl AppBuilder {
    /// Creates a builder with the built-in data types registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: MetadataStore::new(),
            resolvers: ResolverRegistry::new(),
            data_types: DataTypeRegistry::with_builtins(),
            routes: RouteTable::new(),
            rule_catalog: StaticRuleBook::new(),
            rule_book: None,
            options: PipelineOptions::default(),
            bindings: Vec::new(),
        }
    }

    /// Registers a route. Fatal if the `(method, path)` pair is taken.
    #[must_use]
    pub fn route(
        mut self,
        method: RouteMethod,
        path: impl Into<String>,
        target: &str,
        member: &str,
        handler: Arc<dyn Handler>,
    ) -> Self {
        let binding = HandlerBinding::new(HandlerKey::new(target, member), handler);
        self.bindings.push(binding.clone());
        self.routes.register(method, path, binding);
        self
    }

    /// Declares a named resolver. Fatal if the name is taken.
    #[must_use]
    pub fn resolver(
        mut self,
        name: impl Into<String>,
        target: &str,
        member: &str,
        handler: Arc<dyn Handler>,
    ) -> Self {
        let binding = HandlerBinding::new(HandlerKey::new(target, member), handler);
        self.bindings.push(binding.clone());
        self.resolvers.register(name, binding);
        self
    }

    /// Attaches a tuple of rule names to a handler method.
    #[must_use]
    pub fn rules(mut self, target: &str, member: &str, names: &[&str]) -> Self {
        let key = HandlerKey::new(target, member);
        let tuple: Vec<String> = names.iter().map(ToString::to_string).collect();
        self.metadata.push(keys::RULES, &key, tuple);
        self
    }

    /// Defines a rule in the built-in rule book.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, rule: Arc<dyn Rule>) -> Self {
        self.rule_catalog.define(name, rule);
        self
    }

    /// Installs a custom rule-lookup collaborator, replacing the built-in
    /// rule book.
    #[must_use]
    pub fn rule_book(mut self, book: Arc<dyn RuleBook>) -> Self {
        self.rule_book = Some(book);
        self
    }

    /// Binds a handler parameter to an arbitrary resolver strategy.
    #[must_use]
    pub fn inject(
        mut self,
        target: &str,
        member: &str,
        injectable: Injectable,
        strategy: Arc<dyn ResolveStrategy>,
    ) -> Self {
        let key = HandlerKey::new(target, member);
        self.metadata
            .push(keys::INJECTION, &key, InjectionConfig::new(injectable, strategy));
        self
    }

    /// Binds a handler parameter to a named resource.
    #[must_use]
    pub fn inject_resource(self, target: &str, member: &str, index: usize, name: &str) -> Self {
        self.inject(
            target,
            member,
            Injectable::new(index, vec![json!(name)]),
            Arc::new(ResourceResolver::new()),
        )
    }

    /// Binds a handler parameter to a path parameter.
    #[must_use]
    pub fn inject_path(self, target: &str, member: &str, index: usize, param: &str) -> Self {
        self.inject(
            target,
            member,
            Injectable::new(index, vec![json!(param)]),
            Arc::new(PathResolver),
        )
    }

    /// Binds a handler parameter to a query parameter.
    #[must_use]
    pub fn inject_query(self, target: &str, member: &str, index: usize, param: &str) -> Self {
        self.inject(
            target,
            member,
            Injectable::new(index, vec![json!(param)]),
            Arc::new(QueryResolver),
        )
    }

    /// Binds a handler parameter to the decoded request body.
    #[must_use]
    pub fn inject_body(self, target: &str, member: &str, index: usize) -> Self {
        self.inject(
            target,
            member,
            Injectable::new(index, vec![]),
            Arc::new(BodyResolver),
        )
    }

    /// Declares the default success status code for non-Response returns.
    #[must_use]
    pub fn response_code(mut self, target: &str, member: &str, code: StatusCode) -> Self {
        self.metadata
            .define(keys::RESPONSE_CODE, &HandlerKey::new(target, member), code);
        self
    }

    /// Declares the default error status code for non-Response rejections.
    #[must_use]
    pub fn error_code(mut self, target: &str, member: &str, code: StatusCode) -> Self {
        self.metadata
            .define(keys::ERROR_CODE, &HandlerKey::new(target, member), code);
        self
    }

    /// Declares the sanctioned output shape for a handler's responses.
    #[must_use]
    pub fn response_shape(mut self, target: &str, member: &str, shape: OutputShape) -> Self {
        self.metadata
            .define(keys::RESPONSE_SHAPE, &HandlerKey::new(target, member), shape);
        self
    }

    /// Appends a data-type descriptor to the ordered registry.
    #[must_use]
    pub fn data_type(mut self, descriptor: Arc<dyn DataType>) -> Self {
        self.data_types.register(descriptor);
        self
    }

    /// Overrides the pipeline options.
    #[must_use]
    pub fn options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the configuration, freezes the registries, and produces the
    /// application.
    ///
    /// Fatal if any bound handler's injection configs do not form a dense
    /// `0..n-1` cover of its declared signature — positional argument
    /// mapping would be corrupted, so no request can be served correctly.
    #[must_use]
    pub fn build(self) -> App {
        for binding in &self.bindings {
            self.validate_binding(binding);
        }

        let rule_book = self
            .rule_book
            .unwrap_or_else(|| Arc::new(self.rule_catalog) as Arc<dyn RuleBook>);

        let pipeline = Pipeline::new(
            Arc::new(self.metadata),
            Arc::new(self.resolvers),
            Arc::new(self.data_types),
            rule_book,
            self.options,
        );

        tracing::debug!(routes = self.routes.len(), "application built");
        App {
            routes: self.routes,
            pipeline,
        }
    }

    fn validate_binding(&self, binding: &HandlerBinding) {
        let key = binding.key();
        let arity = binding.param_types().len();
        let configs = self
            .metadata
            .get::<Vec<InjectionConfig>>(keys::INJECTION, key)
            .map_or(&[][..], Vec::as_slice);

        if configs.len() != arity {
            fatal(ConfigError::InjectionArity {
                handler: key.clone(),
                declared: arity,
                configured: configs.len(),
            });
        }

        let mut seen = vec![false; arity];
        for config in configs {
            let index = config.injectable().index();
            if index >= arity || seen[index] {
                fatal(ConfigError::InjectionIndex {
                    handler: key.clone(),
                    index,
                });
            }
            seen[index] = true;
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::{FnHandler, HandlerValue, ParamType};
    use portico_rules::FnRule;
    use serde_json::json;

    fn handler(params: Vec<ParamType>, value: serde_json::Value) -> Arc<dyn Handler> {
        Arc::new(FnHandler::new(params, move |_args, _ctx| {
            let value = value.clone();
            async move { Ok(HandlerValue::Value(value)) }
        }))
    }

    #[tokio::test]
    async fn test_dispatch_happy_path() {
        let app = App::builder()
            .route(
                RouteMethod::Get,
                "/ping",
                "Health",
                "ping",
                handler(vec![], json!("pong")),
            )
            .build();

        let response = app
            .dispatch(RouteMethod::Get, "/ping", &RequestContext::mock())
            .await;
        assert_eq!(response, Response::ok(json!("pong")));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_route_is_404() {
        let app = App::builder().build();
        let response = app
            .dispatch(RouteMethod::Get, "/nowhere", &RequestContext::mock())
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_injection_and_rules_flow() {
        let echo = Arc::new(FnHandler::new(
            vec![ParamType::Integer],
            |args: Vec<portico_core::ArgValue>, _ctx| async move {
                let id = args[0].as_integer().map(i64::from).unwrap_or_default();
                Ok(HandlerValue::Value(json!({"id": id})))
            },
        ));

        let app = App::builder()
            .route(RouteMethod::Get, "/users/{id}", "Users", "get", echo)
            .inject_path("Users", "get", 0, "id")
            .rule("allow", Arc::new(FnRule::new(|_ctx| async { Ok(()) })))
            .rules("Users", "get", &["allow"])
            .build();

        let ctx = RequestContext::new().with_param("id", "7");
        let response = app.dispatch(RouteMethod::Get, "/users/{id}", &ctx).await;
        assert_eq!(response, Response::ok(json!({"id": 7})));
    }

    #[tokio::test]
    async fn test_response_code_declaration() {
        let app = App::builder()
            .route(
                RouteMethod::Post,
                "/users",
                "Users",
                "create",
                handler(vec![], json!({"id": 1})),
            )
            .response_code("Users", "create", StatusCode::CREATED)
            .build();

        let response = app
            .dispatch(RouteMethod::Post, "/users", &RequestContext::mock())
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    #[should_panic(expected = "does not match its declared signature")]
    fn test_build_rejects_unconfigured_parameters() {
        let _ = App::builder()
            .route(
                RouteMethod::Get,
                "/broken",
                "Broken",
                "get",
                handler(vec![ParamType::Number], json!(null)),
            )
            // No injection config for parameter 0.
            .build();
    }

    #[test]
    #[should_panic(expected = "duplicate or out-of-range parameter index")]
    fn test_build_rejects_index_gaps() {
        let _ = App::builder()
            .route(
                RouteMethod::Get,
                "/gappy",
                "Gappy",
                "get",
                handler(vec![ParamType::Number, ParamType::Number], json!(null)),
            )
            .inject_path("Gappy", "get", 0, "a")
            .inject_path("Gappy", "get", 0, "b")
            .build();
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_route_is_fatal() {
        let _ = App::builder()
            .route(RouteMethod::Get, "/dup", "A", "one", handler(vec![], json!(1)))
            .route(RouteMethod::Get, "/dup", "B", "two", handler(vec![], json!(2)));
    }

    #[test]
    #[should_panic(expected = "has already been registered with this name")]
    fn test_duplicate_resolver_is_fatal() {
        let _ = App::builder()
            .resolver("session", "A", "one", handler(vec![], json!(1)))
            .resolver("session", "B", "two", handler(vec![], json!(2)));
    }
}
