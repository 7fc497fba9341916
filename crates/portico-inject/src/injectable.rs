//! Injection configuration types.

use crate::ResolveStrategy;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A single declared parameter slot on a handler.
///
/// Identified by its positional index, with resolver-specific arguments
/// (e.g. the parameter name for a path resolver, or the resolver name for a
/// resource injection).
#[derive(Debug, Clone)]
pub struct Injectable {
    index: usize,
    arguments: Vec<Value>,
}

impl Injectable {
    /// Creates an injectable for the parameter at `index`.
    #[must_use]
    pub fn new(index: usize, arguments: Vec<Value>) -> Self {
        Self { index, arguments }
    }

    /// Returns the positional parameter index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the resolver-specific arguments.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Returns the first argument as a string, the common case for resolvers
    /// keyed by a name.
    #[must_use]
    pub fn first_argument_str(&self) -> Option<&str> {
        self.arguments.first().and_then(Value::as_str)
    }
}

/// The injection configuration for one handler parameter: an injectable slot
/// bound to the strategy that produces its value.
///
/// Within one handler's configs the indices are unique and dense `0..n-1`;
/// the application builder enforces this before any request is served.
#[derive(Clone)]
pub struct InjectionConfig {
    injectable: Injectable,
    resolver: Arc<dyn ResolveStrategy>,
}

impl InjectionConfig {
    /// Creates a config binding `injectable` to `resolver`.
    #[must_use]
    pub fn new(injectable: Injectable, resolver: Arc<dyn ResolveStrategy>) -> Self {
        Self {
            injectable,
            resolver,
        }
    }

    /// Returns the injectable slot.
    #[must_use]
    pub const fn injectable(&self) -> &Injectable {
        &self.injectable
    }

    /// Returns the resolver strategy.
    #[must_use]
    pub fn resolver(&self) -> &Arc<dyn ResolveStrategy> {
        &self.resolver
    }
}

impl fmt::Debug for InjectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionConfig")
            .field("injectable", &self.injectable)
            .finish()
    }
}
