#![forbid(unsafe_code)]

//! Structured logging surface.
//!
//! dropkit never installs a subscriber. With the `tracing` feature enabled the
//! widgets emit events whose `message` field follows a `<widget>.<event>`
//! naming scheme (`dropdown.open`, `dropdown.commit`, ...), so applications
//! can filter on target `dropkit_widgets` and get one line per transition.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace, warn};

/// Log target used by the core primitives.
pub const CORE_TARGET: &str = "dropkit_core";
