#![forbid(unsafe_code)]

//! Core: temporal index, zoom table, zoom anchors, entry model, geometry, and
//! input events.

pub mod anchor;
pub mod date;
pub mod entry;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod zoom;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
