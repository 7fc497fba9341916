//! Named resolver registry.

use portico_core::{fatal, ConfigError, HandlerBinding};
use std::collections::HashMap;

/// Maps resolver names to handler bindings.
///
/// Names are claimed once: registering a second handler under an existing
/// name is a fatal configuration error — the process terminates rather than
/// silently shadowing the first registration, which is retained.
///
/// # Example
///
/// ```
/// use portico_inject::ResolverRegistry;
/// use portico_core::{FnHandler, HandlerBinding, HandlerKey, HandlerValue};
/// use std::sync::Arc;
///
/// let mut registry = ResolverRegistry::new();
/// let handler = FnHandler::new(vec![], |_args, _ctx| async { Ok(HandlerValue::Void) });
/// registry.register(
///     "session",
///     HandlerBinding::new(HandlerKey::new("Auth", "session"), Arc::new(handler)),
/// );
///
/// assert!(registry.lookup("session").is_some());
/// assert!(registry.lookup("missing").is_none());
/// ```
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, HandlerBinding>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `binding` under `name`.
    ///
    /// Fatal if the name is already registered.
    pub fn register(&mut self, name: impl Into<String>, binding: HandlerBinding) {
        let name = name.into();

        if let Some(existing) = self.resolvers.get(&name) {
            fatal(ConfigError::DuplicateResolver {
                name,
                handler: binding.key().clone(),
                existing: existing.key().clone(),
            });
        }

        tracing::debug!(resolver = %name, handler = %binding.key(), "registered resolver");
        self.resolvers.insert(name, binding);
    }

    /// Returns the binding registered under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&HandlerBinding> {
        self.resolvers.get(name)
    }

    /// Returns the number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns `true` if no resolvers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolver_count", &self.resolvers.len())
            .finish()
    }
}
