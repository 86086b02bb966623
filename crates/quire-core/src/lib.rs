#![forbid(unsafe_code)]

//! Core: pixel geometry, colors, input events, the drawing surface contract
//! and logging.

pub mod color;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod surface;

pub use color::Color;
pub use geometry::{Point, Rect};
pub use surface::{DrawError, FontId, Surface};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, trace, trace_span, warn};
