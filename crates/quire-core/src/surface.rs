#![forbid(unsafe_code)]

//! Drawing surface contract.
//!
//! A field never rasterizes anything itself. It issues filled rectangles and
//! positioned text runs against a [`Surface`] supplied by the host, which owns
//! the actual image, glyph rasterizer and font faces.

use std::fmt;

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Identifies a font face to the host surface.
///
/// Font providers hand out ids; surfaces map them back to whatever face
/// object they rasterize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FontId(pub u32);

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font#{}", self.0)
    }
}

/// Failures reported by a host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The surface has no face registered for the font.
    MissingFont(FontId),
    /// `pop_clip` without a matching `push_clip`.
    ClipUnderflow,
    /// Backend-specific failure.
    Backend(String),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFont(id) => write!(f, "no face registered for {id}"),
            Self::ClipUnderflow => write!(f, "clip stack underflow"),
            Self::Backend(msg) => write!(f, "surface backend error: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Something a field can draw onto.
pub trait Surface {
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError>;

    /// Draw `text` with its baseline starting at `origin`.
    fn draw_text(
        &mut self,
        font: FontId,
        size: f32,
        text: &str,
        origin: Point,
        color: Color,
    ) -> Result<(), DrawError>;

    /// Restrict subsequent drawing to `rect` until the matching [`Surface::pop_clip`].
    fn push_clip(&mut self, _rect: Rect) -> Result<(), DrawError> {
        Ok(())
    }

    /// Undo the most recent [`Surface::push_clip`].
    fn pop_clip(&mut self) -> Result<(), DrawError> {
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        (**self).fill_rect(rect, color)
    }

    fn draw_text(
        &mut self,
        font: FontId,
        size: f32,
        text: &str,
        origin: Point,
        color: Color,
    ) -> Result<(), DrawError> {
        (**self).draw_text(font, size, text, origin, color)
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), DrawError> {
        (**self).push_clip(rect)
    }

    fn pop_clip(&mut self) -> Result<(), DrawError> {
        (**self).pop_clip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        fills: usize,
        texts: Vec<String>,
    }

    impl Surface for Counting {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), DrawError> {
            self.fills += 1;
            Ok(())
        }

        fn draw_text(
            &mut self,
            _font: FontId,
            _size: f32,
            text: &str,
            _origin: Point,
            _color: Color,
        ) -> Result<(), DrawError> {
            self.texts.push(text.to_owned());
            Ok(())
        }
    }

    #[test]
    fn default_clip_methods_succeed() {
        let mut surface = Counting::default();
        assert!(surface.push_clip(Rect::from_size(4, 4)).is_ok());
        assert!(surface.pop_clip().is_ok());
    }

    fn paint<S: Surface>(mut surface: S) -> Result<(), DrawError> {
        surface.fill_rect(Rect::from_size(1, 1), Color::BLACK)?;
        surface.draw_text(FontId(1), 12.0, "hi", Point::new(0, 10), Color::WHITE)
    }

    #[test]
    fn mut_ref_forwards() {
        let mut surface = Counting::default();
        paint(&mut surface).unwrap();
        assert_eq!(surface.fills, 1);
        assert_eq!(surface.texts, vec!["hi".to_owned()]);
    }

    #[test]
    fn draw_error_display() {
        assert_eq!(
            DrawError::MissingFont(FontId(3)).to_string(),
            "no face registered for font#3"
        );
        assert_eq!(DrawError::ClipUnderflow.to_string(), "clip stack underflow");
        assert_eq!(
            DrawError::Backend("gpu lost".into()).to_string(),
            "surface backend error: gpu lost"
        );
    }
}
