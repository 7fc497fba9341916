//! Route table.
//!
//! Routes bind a `(method, path)` pair to a handler. Uniqueness is enforced
//! per pair at registration time; a duplicate registration is a fatal
//! configuration error that names both handlers.

use portico_core::{fatal, ConfigError, HandlerBinding, HandlerKey};
use serde::{Deserialize, Serialize};

/// The request methods a route can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl RouteMethod {
    /// Returns the method's canonical uppercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered route: a method and path bound to a handler.
#[derive(Debug, Clone)]
pub struct Route {
    method: RouteMethod,
    path: String,
    binding: HandlerBinding,
}

impl Route {
    /// Returns the route method.
    #[must_use]
    pub const fn method(&self) -> RouteMethod {
        self.method
    }

    /// Returns the route path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the bound handler.
    #[must_use]
    pub const fn binding(&self) -> &HandlerBinding {
        &self.binding
    }
}

/// The set of registered routes.
///
/// # Example
///
/// ```
/// use portico_pipeline::{RouteMethod, RouteTable};
/// use portico_core::{FnHandler, HandlerBinding, HandlerKey, HandlerValue};
/// use std::sync::Arc;
///
/// let mut table = RouteTable::new();
/// let handler = FnHandler::new(vec![], |_args, _ctx| async { Ok(HandlerValue::Void) });
/// table.register(
///     RouteMethod::Get,
///     "/health",
///     HandlerBinding::new(HandlerKey::new("Health", "check"), Arc::new(handler)),
/// );
///
/// assert!(table.get(RouteMethod::Get, "/health").is_some());
/// assert!(table.get(RouteMethod::Post, "/health").is_none());
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route.
    ///
    /// Fatal if the `(method, path)` pair is already registered.
    pub fn register(&mut self, method: RouteMethod, path: impl Into<String>, binding: HandlerBinding) {
        let path = path.into();

        if let Some(existing) = self.get(method, &path) {
            fatal(ConfigError::DuplicateRoute {
                method: method.to_string(),
                path,
                handler: binding.key().clone(),
                existing: existing.binding().key().clone(),
            });
        }

        tracing::debug!(%method, %path, handler = %binding.key(), "bound route");
        self.routes.push(Route {
            method,
            path,
            binding,
        });
    }

    /// Returns the route registered for `(method, path)`, if any.
    #[must_use]
    pub fn get(&self, method: RouteMethod, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
    }

    /// Returns the route bound to the given handler, if any.
    #[must_use]
    pub fn get_by_handler(&self, key: &HandlerKey) -> Option<&Route> {
        self.routes.iter().find(|route| route.binding.key() == key)
    }

    /// Returns an iterator over all registered routes.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
