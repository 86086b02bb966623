#![forbid(unsafe_code)]

//! Text fields for Quire.
//!
//! [`Field`] composes the pieces in this crate:
//! - [`Viewport`] - scroll offset and its clamping rules
//! - [`ScrollBar`] - track/handle geometry and handle dragging
//! - [`Renderer`] - line placement ([`RenderPlan`]) and drawing
//! - [`InputController`] - keyboard, pointer and wheel handling with [`KeyRepeat`]
//! - [`FieldStyle`] - colors, spacing and timing configuration

pub mod field;
pub mod input;
pub mod render;
pub mod scrollbar;
pub mod style;
pub mod viewport;

pub use field::{Field, FieldError, INPUT_SUFFIX, MAX_FONT_SIZE, MAX_WRAP_PASSES};
pub use input::{ChangedHandler, ConfirmedHandler, FieldParts, InputController, KeyRepeat};
pub use render::{Paint, RenderContext, RenderPlan, Renderer, TextRun};
pub use scrollbar::{ScrollBar, ScrollBarHit};
pub use style::{Align, FieldColors, FieldStyle, HandleBorder};
pub use viewport::Viewport;
