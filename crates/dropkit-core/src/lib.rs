#![forbid(unsafe_code)]

//! Core: input events, hit geometry, and widget-owned resources.
//!
//! # Role in dropkit
//! `dropkit-core` is the input layer. It owns the normalized event types that
//! widgets consume, the rectangle math used for pointer hit testing, and the
//! two lifetime-scoped resources an interactive widget needs:
//!
//! - **ListenerRegistry**: scoped interest in document-level input (outside
//!   pointer presses, window blur). Subscriptions are RAII guards that release
//!   on drop.
//! - **DeferredAction**: a cancellable, deadline-based action driven by the
//!   host's clock.
//!
//! # How it fits in the system
//! `dropkit-widgets` consumes `dropkit-core::Event` values. Nothing here knows
//! about options or selection, so multiple widget crates can share it.

pub mod deferred;
pub mod event;
pub mod geometry;
pub mod listeners;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
