//! The descriptor trait and the ordered registry.

use portico_core::ArgValue;
use serde_json::Value;
use std::sync::Arc;

/// A pluggable type descriptor.
///
/// Descriptors decide whether a raw JSON value can be cast to their type and
/// perform the cast. They are probed by the registry in registration order.
pub trait DataType: Send + Sync {
    /// Returns the descriptor's name (e.g. `"integer"`).
    ///
    /// Names are used by output shapes to direct casting and in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns `true` if `value` can be cast to this type.
    fn can_cast(&self, value: &Value) -> bool;

    /// Casts `value` into this type's normalized form.
    ///
    /// Callers must check [`can_cast`](Self::can_cast) first; casting an
    /// unacceptable value falls back to wrapping it unchanged.
    fn cast(&self, value: &Value) -> ArgValue;
}

/// An ordered, append-only set of type descriptors.
///
/// # Ordering hazard
///
/// [`find_match`](Self::find_match) probes descriptors in registration order
/// and the **first** accepting descriptor wins. The built-in string
/// descriptor accepts every non-composite value, so any descriptor for a
/// more specific primitive type registered after it is never reached by a
/// probe. This precedence is part of the registry's contract: register
/// specific descriptors before catch-alls, or direct the cast by name
/// instead of probing.
///
/// # Example
///
/// ```
/// use portico_datatype::DataTypeRegistry;
/// use serde_json::json;
///
/// let registry = DataTypeRegistry::with_builtins();
/// let descriptor = registry.find_match(&json!([1, 2])).expect("arrays match");
/// assert_eq!(descriptor.name(), "array");
/// ```
#[derive(Clone, Default)]
pub struct DataTypeRegistry {
    types: Vec<Arc<dyn DataType>>,
}

impl DataTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in descriptors, in the canonical
    /// order: string, number, integer, date, array, object.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::StringDataType));
        registry.register(Arc::new(crate::NumberDataType));
        registry.register(Arc::new(crate::IntegerDataType));
        registry.register(Arc::new(crate::DateDataType));
        registry.register(Arc::new(crate::ArrayDataType));
        registry.register(Arc::new(crate::ObjectDataType));
        registry
    }

    /// Appends a descriptor to the probe order.
    pub fn register(&mut self, descriptor: Arc<dyn DataType>) {
        tracing::debug!(name = descriptor.name(), "registered data type");
        self.types.push(descriptor);
    }

    /// Returns the first registered descriptor whose `can_cast` accepts
    /// `value`, probing in registration order.
    #[must_use]
    pub fn find_match(&self, value: &Value) -> Option<&Arc<dyn DataType>> {
        self.types.iter().find(|t| t.can_cast(value))
    }

    /// Returns the descriptor registered under `name`, if any.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<dyn DataType>> {
        self.types.iter().find(|t| t.name() == name)
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no descriptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl std::fmt::Debug for DataTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(|t| t.name()))
            .finish()
    }
}
