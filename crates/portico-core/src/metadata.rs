//! Startup-time metadata store.
//!
//! The store is an associative table keyed by `(handler key, metadata key)`,
//! holding arbitrarily-typed values. It replaces reflection-emitted metadata
//! with an explicit registration table: the application builder populates it
//! during startup via ordinary function calls, and the pipeline reads it at
//! dispatch time. All writes happen during single-threaded startup, before
//! any request is processed, so the store needs no locking.
//!
//! [`define`](MetadataStore::define) overwrites. List-valued metadata
//! (injection configs, rule tuples) is accumulated by reading the existing
//! list, appending, and writing back — [`push`](MetadataStore::push) does
//! exactly that.

use crate::HandlerKey;
use std::any::Any;
use std::collections::HashMap;

/// Well-known metadata keys used by the pipeline.
pub mod keys {
    /// `Vec<InjectionConfig>` — per-parameter injection configuration.
    pub const INJECTION: &str = "Injection";
    /// `Vec<Vec<String>>` — ordered rule-name tuples.
    pub const RULES: &str = "Rules";
    /// `http::StatusCode` — default success code for non-Response returns.
    pub const RESPONSE_CODE: &str = "ResponseCode";
    /// `http::StatusCode` — default error code for non-Response rejections.
    pub const ERROR_CODE: &str = "ErrorCode";
    /// `OutputShape` — sanctioned output fields for response scrubbing.
    pub const RESPONSE_SHAPE: &str = "ResponseShape";
}

/// An associative store of per-handler metadata.
///
/// # Example
///
/// ```
/// use portico_core::{HandlerKey, MetadataStore};
///
/// let mut store = MetadataStore::new();
/// let key = HandlerKey::new("UserController", "get_user");
///
/// store.define("ResponseCode", &key, 201u16);
/// assert_eq!(store.get::<u16>("ResponseCode", &key), Some(&201));
///
/// // define overwrites
/// store.define("ResponseCode", &key, 202u16);
/// assert_eq!(store.get::<u16>("ResponseCode", &key), Some(&202));
/// ```
#[derive(Default)]
pub struct MetadataStore {
    entries: HashMap<(HandlerKey, String), Box<dyn Any + Send + Sync>>,
}

impl MetadataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines metadata under `(target, key)`, overwriting any existing value.
    pub fn define<T: Any + Send + Sync>(&mut self, key: impl Into<String>, target: &HandlerKey, value: T) {
        self.entries
            .insert((target.clone(), key.into()), Box::new(value));
    }

    /// Returns the metadata stored under `(target, key)`, if present and of
    /// the requested type.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str, target: &HandlerKey) -> Option<&T> {
        self.entries
            .get(&(target.clone(), key.to_string()))
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Returns a clone of the metadata stored under `(target, key)`.
    #[must_use]
    pub fn get_cloned<T: Any + Clone>(&self, key: &str, target: &HandlerKey) -> Option<T> {
        self.get::<T>(key, target).cloned()
    }

    /// Appends an item to the list stored under `(target, key)`.
    ///
    /// Reads the existing `Vec<T>` (empty if absent), appends, and writes the
    /// list back — the accumulation contract for injection configs and rules.
    pub fn push<T: Any + Send + Sync + Clone>(&mut self, key: &str, target: &HandlerKey, item: T) {
        let mut list: Vec<T> = self.get_cloned(key, target).unwrap_or_default();
        list.push(item);
        self.define(key, target, list);
    }

    /// Returns the number of `(target, key)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for MetadataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataStore")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
