//! Output scrubbing.
//!
//! Scrubbing filters a response payload down to the fields sanctioned by a
//! declared [`OutputShape`], so handlers can return rich internal values
//! while the pipeline strips anything the declared shape does not name.
//! Typed fields are normalized through the [`DataTypeRegistry`]: the named
//! descriptor validates and casts the retained value, and a value the
//! descriptor rejects is removed along with the unsanctioned fields.

use crate::DataTypeRegistry;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct FieldShape {
    data_type: Option<String>,
    nested: Option<OutputShape>,
}

/// The sanctioned fields of a response payload.
///
/// # Example
///
/// ```
/// use portico_datatype::{scrub, DataTypeRegistry, OutputShape};
/// use serde_json::json;
///
/// let shape = OutputShape::new()
///     .field("id")
///     .field("name");
///
/// let registry = DataTypeRegistry::with_builtins();
/// let mut payload = json!({"id": 1, "name": "Alice", "password_hash": "..."});
/// scrub(&mut payload, &shape, &registry);
///
/// assert_eq!(payload, json!({"id": 1, "name": "Alice"}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputShape {
    fields: BTreeMap<String, FieldShape>,
}

impl OutputShape {
    /// Creates an empty shape. Scrubbing against it removes every field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanctions a field, retained as-is.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldShape::default());
        self
    }

    /// Sanctions a field normalized through the named data type.
    ///
    /// The descriptor is looked up in the registry by name at scrub time; a
    /// value it cannot cast is removed.
    #[must_use]
    pub fn typed_field(mut self, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.fields.insert(
            name.into(),
            FieldShape {
                data_type: Some(data_type.into()),
                nested: None,
            },
        );
        self
    }

    /// Sanctions a field holding a nested object (or array of objects),
    /// scrubbed recursively against `shape`.
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, shape: OutputShape) -> Self {
        self.fields.insert(
            name.into(),
            FieldShape {
                data_type: None,
                nested: Some(shape),
            },
        );
        self
    }

    /// Returns `true` if the shape sanctions the field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns `true` if the shape sanctions no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Scrubs a payload in place against a shape.
///
/// Objects lose every field the shape does not sanction; arrays are scrubbed
/// element-wise against the same shape; scalars pass through unchanged.
pub fn scrub(value: &mut Value, shape: &OutputShape, registry: &DataTypeRegistry) {
    match value {
        Value::Object(map) => {
            map.retain(|name, _| shape.contains(name));

            let mut rejected = Vec::new();
            for (name, field) in &shape.fields {
                let Some(entry) = map.get_mut(name) else {
                    continue;
                };

                if let Some(nested) = &field.nested {
                    scrub(entry, nested, registry);
                } else if let Some(type_name) = &field.data_type {
                    match registry.find_by_name(type_name) {
                        Some(descriptor) if descriptor.can_cast(entry) => {
                            *entry = descriptor.cast(entry).into_json();
                        }
                        _ => rejected.push(name.clone()),
                    }
                }
            }
            for name in rejected {
                map.remove(&name);
            }
        }
        Value::Array(items) => {
            for item in items {
                scrub(item, shape, registry);
            }
        }
        _ => {}
    }
}
