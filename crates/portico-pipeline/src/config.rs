//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Default bound on named-resolver nesting.
pub const DEFAULT_MAX_RESOLVER_DEPTH: usize = 8;

/// Tunable pipeline behavior.
///
/// Deserializes with defaults for absent fields and rejects unknown fields,
/// so a typo in a configuration file fails loading instead of being silently
/// ignored.
///
/// # Example
///
/// ```
/// use portico_pipeline::PipelineOptions;
///
/// let options: PipelineOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(options.max_resolver_depth, 8);
///
/// let options: PipelineOptions =
///     serde_json::from_str(r#"{"max_resolver_depth": 3}"#).unwrap();
/// assert_eq!(options.max_resolver_depth, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    /// Maximum named-resolver nesting depth before a resolution fails closed
    /// with 508 Loop Detected. Guards against resolver reference cycles.
    pub max_resolver_depth: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_resolver_depth: DEFAULT_MAX_RESOLVER_DEPTH,
        }
    }
}
