//! Rule and rule-book traits.

use async_trait::async_trait;
use portico_core::{RequestContext, Response};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// A named guard check evaluated against a request context.
///
/// A rule passes by returning `Ok(())` and fails with the [`Response`] the
/// pipeline should reject with — typically a 401/403-class response.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Checks the rule against the request context.
    async fn check(&self, ctx: &RequestContext) -> Result<(), Response>;
}

/// A function-based rule wrapper.
///
/// # Example
///
/// ```
/// use portico_rules::FnRule;
/// use portico_core::Response;
///
/// let authenticated = FnRule::new(|ctx| async move {
///     if ctx.header("authorization").is_some() {
///         Ok(())
///     } else {
///         Err(Response::unauthorized("Unauthorized"))
///     }
/// });
/// ```
pub struct FnRule<F> {
    func: F,
}

impl<F, Fut> FnRule<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Response>> + Send + 'static,
{
    /// Creates a rule from an async closure.
    #[must_use]
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> Rule for FnRule<F>
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Response>> + Send + 'static,
{
    async fn check(&self, ctx: &RequestContext) -> Result<(), Response> {
        (self.func)(ctx.clone()).await
    }
}

/// Supplies rule definitions by name.
///
/// The pipeline resolves the rule names declared on a handler through this
/// collaborator at evaluation time.
pub trait RuleBook: Send + Sync {
    /// Returns the rule registered under `name`, if any.
    fn rule(&self, name: &str) -> Option<Arc<dyn Rule>>;
}

/// An in-memory rule book.
#[derive(Default)]
pub struct StaticRuleBook {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl StaticRuleBook {
    /// Creates an empty rule book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under `name`, replacing any existing definition.
    pub fn define(&mut self, name: impl Into<String>, rule: Arc<dyn Rule>) {
        self.rules.insert(name.into(), rule);
    }

    /// Builder-style variant of [`define`](Self::define).
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, rule: Arc<dyn Rule>) -> Self {
        self.define(name, rule);
        self
    }

    /// Returns the number of defined rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleBook for StaticRuleBook {
    fn rule(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }
}
