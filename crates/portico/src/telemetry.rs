//! Tracing initialization.
//!
//! Portico emits structured events through the `tracing` ecosystem:
//! registration logs one `debug!` per bound route and resolver, and the
//! pipeline logs dispatches and fault classifications. This module wires a
//! `tracing-subscriber` formatter for applications that do not bring their
//! own subscriber.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Initializes a formatted `tracing` subscriber.
///
/// The filter is taken from `RUST_LOG` when set, defaulting to `info`.
/// Call once at process start, before building the application, so
/// registration-time events are captured.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,no_run
/// portico::init_tracing().expect("failed to install tracing subscriber");
/// ```
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish()
        .try_init()
}
