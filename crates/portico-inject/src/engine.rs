//! The injection resolution engine.
//!
//! Fan-out / fan-in over a handler's injection configs: every resolver
//! starts concurrently, the join unwraps response-shaped values, and each
//! raw value is normalized against the handler's declared parameter type.
//! The argument array is always ordered by declared index, never by
//! resolution completion order.

use crate::{coerce, InjectionConfig, ResolutionEnv};
use futures_util::future::try_join_all;
use portico_core::{ArgValue, HandlerBinding, RequestContext, Response};
use serde_json::Value;

/// Resolves the full argument array for a handler.
///
/// Every config's resolver is started concurrently. The first resolver
/// rejection rejects the whole resolution with that rejection's response and
/// drops in-flight siblings. After the join, values are normalized in index
/// order and the first bad-type failure (by index, not by completion time)
/// rejects the resolution.
///
/// A handler with zero configs and zero declared parameters resolves to an
/// empty argument array. Config density and arity are enforced against the
/// declared signature when the application is built, so every declared slot
/// has exactly one config by the time requests arrive; a slot left
/// unconfigured resolves as null.
pub async fn resolve_injection(
    configs: &[InjectionConfig],
    binding: &HandlerBinding,
    ctx: &RequestContext,
    env: &ResolutionEnv<'_>,
) -> Result<Vec<ArgValue>, Response> {
    let arity = binding.param_types().len();
    if configs.is_empty() && arity == 0 {
        return Ok(Vec::new());
    }

    let resolutions = configs.iter().map(|config| async move {
        let resolved = config
            .resolver()
            .resolve(config.injectable(), ctx, env)
            .await?;
        Ok::<_, Response>((config.injectable().index(), resolved.into_raw()))
    });

    let resolved = try_join_all(resolutions).await?;

    let mut slots: Vec<Value> = vec![Value::Null; arity];
    for (index, value) in resolved {
        if let Some(slot) = slots.get_mut(index) {
            *slot = value;
        }
    }

    let mut args = Vec::with_capacity(arity);
    for (index, raw) in slots.into_iter().enumerate() {
        args.push(coerce(raw, binding.param_types()[index], index)?);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Injectable, PipelineRunner, Resolved, ResolverRegistry, ResolveStrategy};
    use async_trait::async_trait;
    use portico_core::{FnHandler, HandlerKey, HandlerValue, ParamType};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct NoopRunner;

    #[async_trait]
    impl PipelineRunner for NoopRunner {
        async fn run_handler(
            &self,
            _binding: &HandlerBinding,
            _ctx: &RequestContext,
            _depth: usize,
        ) -> Response {
            Response::no_content()
        }
    }

    /// Resolves with the injectable's first argument, verbatim.
    struct StaticResolver;

    #[async_trait]
    impl ResolveStrategy for StaticResolver {
        async fn resolve(
            &self,
            injectable: &Injectable,
            _ctx: &RequestContext,
            _env: &ResolutionEnv<'_>,
        ) -> Result<Resolved, Response> {
            Ok(Resolved::Value(
                injectable.arguments().first().cloned().unwrap_or(Value::Null),
            ))
        }
    }

    /// Sleeps before resolving, to scramble completion order.
    struct DelayedResolver(u64);

    #[async_trait]
    impl ResolveStrategy for DelayedResolver {
        async fn resolve(
            &self,
            injectable: &Injectable,
            _ctx: &RequestContext,
            _env: &ResolutionEnv<'_>,
        ) -> Result<Resolved, Response> {
            tokio::time::sleep(Duration::from_millis(self.0)).await;
            Ok(Resolved::Value(
                injectable.arguments().first().cloned().unwrap_or(Value::Null),
            ))
        }
    }

    struct RejectingResolver(Response);

    #[async_trait]
    impl ResolveStrategy for RejectingResolver {
        async fn resolve(
            &self,
            _injectable: &Injectable,
            _ctx: &RequestContext,
            _env: &ResolutionEnv<'_>,
        ) -> Result<Resolved, Response> {
            Err(self.0.clone())
        }
    }

    /// Sleeps, then marks completion; used to observe cancellation.
    struct TrackingResolver {
        completed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ResolveStrategy for TrackingResolver {
        async fn resolve(
            &self,
            _injectable: &Injectable,
            _ctx: &RequestContext,
            _env: &ResolutionEnv<'_>,
        ) -> Result<Resolved, Response> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.completed.store(true, Ordering::SeqCst);
            Ok(Resolved::Value(Value::Null))
        }
    }

    fn binding(params: Vec<ParamType>) -> HandlerBinding {
        let handler = FnHandler::new(params, |_args, _ctx| async { Ok(HandlerValue::Void) });
        HandlerBinding::new(HandlerKey::new("Test", "handler"), Arc::new(handler))
    }

    fn config(index: usize, value: Value, resolver: Arc<dyn ResolveStrategy>) -> InjectionConfig {
        InjectionConfig::new(Injectable::new(index, vec![value]), resolver)
    }

    async fn run(
        configs: &[InjectionConfig],
        binding: &HandlerBinding,
    ) -> Result<Vec<ArgValue>, Response> {
        let runner = NoopRunner;
        let resolvers = ResolverRegistry::new();
        let env = ResolutionEnv::new(&runner, &resolvers, 0, 8);
        resolve_injection(configs, binding, &RequestContext::mock(), &env).await
    }

    #[tokio::test]
    async fn test_zero_configs_resolve_to_empty_array() {
        let binding = binding(vec![]);
        let args = run(&[], &binding).await.expect("should resolve");
        assert!(args.is_empty());
    }

    #[tokio::test]
    async fn test_argument_order_matches_index_not_registration() {
        let binding = binding(vec![ParamType::Number, ParamType::Number, ParamType::Number]);
        // Registered in reverse index order.
        let configs = vec![
            config(2, json!(20), Arc::new(StaticResolver)),
            config(1, json!(10), Arc::new(StaticResolver)),
            config(0, json!(0), Arc::new(StaticResolver)),
        ];

        let args = run(&configs, &binding).await.expect("should resolve");
        assert_eq!(args[0], ArgValue::Number(0.0));
        assert_eq!(args[1], ArgValue::Number(10.0));
        assert_eq!(args[2], ArgValue::Number(20.0));
    }

    #[tokio::test]
    async fn test_argument_order_survives_scrambled_completion() {
        tokio::time::pause();

        let binding = binding(vec![ParamType::String, ParamType::String]);
        // Index 0 finishes last by a wide margin.
        let configs = vec![
            config(0, json!("slow"), Arc::new(DelayedResolver(100))),
            config(1, json!("fast"), Arc::new(DelayedResolver(1))),
        ];

        let args = run(&configs, &binding).await.expect("should resolve");
        assert_eq!(args[0].as_str(), Some("slow"));
        assert_eq!(args[1].as_str(), Some("fast"));
    }

    #[tokio::test]
    async fn test_response_shaped_values_are_unwrapped() {
        struct ResponseResolver;

        #[async_trait]
        impl ResolveStrategy for ResponseResolver {
            async fn resolve(
                &self,
                _injectable: &Injectable,
                _ctx: &RequestContext,
                _env: &ResolutionEnv<'_>,
            ) -> Result<Resolved, Response> {
                Ok(Resolved::Response(Response::ok(json!({"id": 7}))))
            }
        }

        let binding = binding(vec![ParamType::Object]);
        let configs = vec![config(0, json!(null), Arc::new(ResponseResolver))];

        let args = run(&configs, &binding).await.expect("should resolve");
        assert_eq!(args[0], ArgValue::from(json!({"id": 7})));
    }

    #[tokio::test]
    async fn test_first_bad_type_by_index_wins() {
        let binding = binding(vec![ParamType::Number, ParamType::Number]);
        // Both slots fail coercion; the rejection must name parameter 0.
        let configs = vec![
            config(1, json!("also-bad"), Arc::new(StaticResolver)),
            config(0, json!("bad"), Arc::new(StaticResolver)),
        ];

        let response = run(&configs, &binding).await.unwrap_err();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        let detail = response.data().and_then(|d| d.as_str()).unwrap_or_default();
        assert!(detail.contains("parameter 0"), "got: {detail}");
        assert!(detail.contains("bad"));
    }

    #[tokio::test]
    async fn test_resolver_rejection_short_circuits() {
        let binding = binding(vec![ParamType::Any, ParamType::Any]);
        let configs = vec![
            config(0, json!(1), Arc::new(StaticResolver)),
            config(
                1,
                json!(null),
                Arc::new(RejectingResolver(Response::forbidden("Forbidden"))),
            ),
        ];

        let response = run(&configs, &binding).await.unwrap_err();
        assert_eq!(response, Response::forbidden("Forbidden"));
    }

    #[tokio::test]
    async fn test_first_rejection_cancels_in_flight_siblings() {
        let completed = Arc::new(AtomicBool::new(false));

        let binding = binding(vec![ParamType::Any, ParamType::Any]);
        let configs = vec![
            config(
                0,
                json!(null),
                Arc::new(RejectingResolver(Response::unauthorized("Unauthorized"))),
            ),
            config(
                1,
                json!(null),
                Arc::new(TrackingResolver {
                    completed: completed.clone(),
                }),
            ),
        ];

        let response = run(&configs, &binding).await.unwrap_err();
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);

        // The sibling future was dropped mid-sleep; it never completed.
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!completed.load(Ordering::SeqCst));
    }

    proptest! {
        #[test]
        fn prop_resolution_orders_by_index_for_any_registration_order(
            order in (1usize..8).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .expect("runtime");

            runtime.block_on(async {
                let arity = order.len();
                let binding = binding(vec![ParamType::Integer; arity]);
                let configs: Vec<_> = order
                    .iter()
                    .map(|&index| {
                        config(index, json!(index * 10), Arc::new(StaticResolver))
                    })
                    .collect();

                let args = run(&configs, &binding).await.expect("should resolve");
                for (index, arg) in args.iter().enumerate() {
                    prop_assert_eq!(
                        arg.as_integer().map(i64::from),
                        Some((index * 10) as i64)
                    );
                }
                Ok(())
            })?;
        }
    }
}
