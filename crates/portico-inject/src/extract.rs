//! Context extraction strategies.
//!
//! Resolver strategies for the request context itself: path parameters,
//! query parameters, and the decoded body. These are the framework-native
//! counterparts of the named-resource strategy — they read directly from the
//! [`RequestContext`] instead of re-entering the pipeline.
//!
//! A missing parameter resolves as null, which passes through coercion
//! unchanged; handlers that require the value declare its type and rely on
//! the route table to guarantee presence.

use crate::{Injectable, Resolved, ResolutionEnv, ResolveStrategy};
use async_trait::async_trait;
use portico_core::{RequestContext, Response};
use serde_json::Value;

/// Resolves a path parameter named by the injectable's first argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

#[async_trait]
impl ResolveStrategy for PathResolver {
    async fn resolve(
        &self,
        injectable: &Injectable,
        ctx: &RequestContext,
        _env: &ResolutionEnv<'_>,
    ) -> Result<Resolved, Response> {
        let name = injectable.first_argument_str().ok_or_else(|| {
            Response::internal_error("path injection is missing a parameter name")
        })?;

        let value = ctx
            .param(name)
            .map_or(Value::Null, |v| Value::String(v.to_string()));
        Ok(Resolved::Value(value))
    }
}

/// Resolves a query parameter named by the injectable's first argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResolver;

#[async_trait]
impl ResolveStrategy for QueryResolver {
    async fn resolve(
        &self,
        injectable: &Injectable,
        ctx: &RequestContext,
        _env: &ResolutionEnv<'_>,
    ) -> Result<Resolved, Response> {
        let name = injectable.first_argument_str().ok_or_else(|| {
            Response::internal_error("query injection is missing a parameter name")
        })?;

        let value = ctx
            .query(name)
            .map_or(Value::Null, |v| Value::String(v.to_string()));
        Ok(Resolved::Value(value))
    }
}

/// Resolves the decoded request body, or one of its fields when the
/// injectable carries a field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyResolver;

#[async_trait]
impl ResolveStrategy for BodyResolver {
    async fn resolve(
        &self,
        injectable: &Injectable,
        ctx: &RequestContext,
        _env: &ResolutionEnv<'_>,
    ) -> Result<Resolved, Response> {
        let body = ctx.body().cloned().unwrap_or(Value::Null);

        let value = match injectable.first_argument_str() {
            Some(field) => body.get(field).cloned().unwrap_or(Value::Null),
            None => body,
        };
        Ok(Resolved::Value(value))
    }
}
