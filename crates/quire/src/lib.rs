#![forbid(unsafe_code)]

//! Quire public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types from the internal crates and offers a lightweight prelude.
//!
//! # Example
//! ```
//! use quire::prelude::*;
//!
//! let font = shared(MonospaceFont::new(FontId(1)).with_advance(1.0));
//! let mut field = Field::new(font, 10.0, FieldStyle::default().with_padding(0));
//! field.set_rect(Rect::new(0, 0, 60, 100));
//! field.write(b"hello world");
//! field.layout();
//! assert_eq!(field.wrapped_lines(), ["hello ", "world"]);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use quire_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseEvent, WheelEvent,
};
pub use quire_core::{Color, DrawError, FontId, Point, Rect, Surface};

// --- Text re-exports -------------------------------------------------------

pub use quire_text::{
    Dirty, FontSource, LineMetrics, LineWrapper, MonospaceFont, SharedFont, TextBuffer,
    WrapOptions, shared,
};

// --- Widget re-exports -----------------------------------------------------

pub use quire_widgets::{
    Align, Field, FieldColors, FieldError, FieldStyle, HandleBorder, INPUT_SUFFIX, MAX_FONT_SIZE,
    RenderPlan, ScrollBar, TextRun, Viewport,
};

// --- Logging ---------------------------------------------------------------

/// Install a JSON log subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_logging() -> bool {
    quire_core::logging::init_json()
}

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Quire hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A field failed to draw.
    Field(FieldError),
    /// The surface failed outside of a field draw.
    Surface(DrawError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Surface(err) => Some(err),
        }
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl From<DrawError> for Error {
    fn from(err: DrawError) -> Self {
        Self::Surface(err)
    }
}

/// Standard result type for Quire APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Align, Color, Error, Event, Field, FieldStyle, FontId, FontSource, KeyCode, KeyEvent,
        MonospaceFont, Point, Rect, Result, SharedFont, Surface, shared,
    };

    pub use crate::{core, text, widgets};
}

pub use quire_core as core;
pub use quire_text as text;
pub use quire_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn errors_convert_and_chain() {
        let err: Error = FieldError::Draw(DrawError::ClipUnderflow).into();
        assert_eq!(err.to_string(), "draw failed: clip stack underflow");
        assert!(err.source().is_some());

        let err: Error = DrawError::Backend("lost context".into()).into();
        assert_eq!(err.to_string(), "surface backend error: lost context");
    }

    #[test]
    fn prelude_builds_a_field() {
        use crate::prelude::*;

        let font = shared(MonospaceFont::new(FontId(2)));
        let mut field = Field::new(font, 12.0, FieldStyle::default());
        field.set_rect(Rect::new(0, 0, 100, 40));
        field.write(b"ok");
        field.layout();
        assert_eq!(field.text(), "ok");
    }
}
