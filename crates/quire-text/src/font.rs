#![forbid(unsafe_code)]

//! Font measurement abstraction.
//!
//! The wrapper and renderer only need two things from a font: the pixel width
//! of a string and the vertical metrics of a line. Rasterization stays with the
//! host surface, which receives the font's [`FontId`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quire_core::FontId;
use unicode_width::UnicodeWidthStr;

/// Vertical metrics for one line of text at a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMetrics {
    /// Distance between consecutive baselines, in pixels.
    pub height: i32,
    /// Distance from the top of the line to the baseline, in pixels.
    pub ascent: i32,
}

/// Measures text for layout.
pub trait FontSource {
    /// Identifier passed to the surface when drawing with this font.
    fn id(&self) -> FontId;

    /// Inked width of `text` at `size`, in pixels.
    ///
    /// Trailing whitespace contributes nothing, and the result must be
    /// monotonic in prefix length: a longer prefix never measures narrower.
    fn measure(&mut self, text: &str, size: f32) -> i32;

    /// Line metrics at `size`.
    fn line_metrics(&mut self, size: f32) -> LineMetrics;
}

/// A font shared between fields.
pub type SharedFont = Arc<Mutex<dyn FontSource + Send>>;

/// Wrap a font for sharing between fields.
pub fn shared<F: FontSource + Send + 'static>(font: F) -> SharedFont {
    Arc::new(Mutex::new(font))
}

/// Lock a shared font.
///
/// Providers hold only caches, so a lock poisoned by a panic elsewhere is
/// still usable.
pub fn lock_font(font: &SharedFont) -> MutexGuard<'_, dyn FontSource + Send + 'static> {
    font.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixed-advance font: every terminal cell of text is the same width.
///
/// Wide characters (CJK, most emoji) take two cells, as reported by
/// `unicode-width`. All metrics scale linearly with the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    id: FontId,
    advance_em: f32,
    line_em: f32,
    ascent_em: f32,
}

impl MonospaceFont {
    /// Create a monospace font with common proportions.
    #[must_use]
    pub const fn new(id: FontId) -> Self {
        Self {
            id,
            advance_em: 0.6,
            line_em: 1.25,
            ascent_em: 0.95,
        }
    }

    /// Advance per cell as a fraction of the font size.
    #[must_use]
    pub const fn with_advance(mut self, advance_em: f32) -> Self {
        self.advance_em = advance_em;
        self
    }

    /// Line height and ascent as fractions of the font size.
    #[must_use]
    pub const fn with_line(mut self, line_em: f32, ascent_em: f32) -> Self {
        self.line_em = line_em;
        self.ascent_em = ascent_em;
        self
    }

    /// Pixel advance of one cell at `size`.
    #[must_use]
    pub fn advance(&self, size: f32) -> i32 {
        scale(1, self.advance_em, size)
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(FontId::default())
    }
}

impl FontSource for MonospaceFont {
    fn id(&self) -> FontId {
        self.id
    }

    fn measure(&mut self, text: &str, size: f32) -> i32 {
        let cells = text.trim_end().width();
        scale(cells, self.advance_em, size)
    }

    fn line_metrics(&mut self, size: f32) -> LineMetrics {
        LineMetrics {
            height: scale(1, self.line_em, size).max(1),
            ascent: scale(1, self.ascent_em, size),
        }
    }
}

#[inline]
fn scale(cells: usize, em: f32, size: f32) -> i32 {
    let px = cells as f64 * f64::from(em) * f64::from(size);
    px.round().clamp(0.0, f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_measures_cells() {
        let mut font = MonospaceFont::new(FontId(1)).with_advance(1.0);
        assert_eq!(font.measure("abc", 10.0), 30);
        assert_eq!(font.measure("你好", 10.0), 40);
        assert_eq!(font.measure("", 10.0), 0);
    }

    #[test]
    fn trailing_whitespace_has_no_ink() {
        let mut font = MonospaceFont::new(FontId(1)).with_advance(1.0);
        assert_eq!(font.measure("ab  ", 10.0), 20);
        assert_eq!(font.measure("   ", 10.0), 0);
        assert_eq!(font.measure(" ab", 10.0), 30);
    }

    #[test]
    fn metrics_scale_with_size() {
        let mut font = MonospaceFont::new(FontId(2)).with_line(1.0, 0.8);
        assert_eq!(
            font.line_metrics(20.0),
            LineMetrics {
                height: 20,
                ascent: 16
            }
        );
        assert_eq!(font.line_metrics(0.0).height, 1);
        assert_eq!(font.id(), FontId(2));
    }

    #[test]
    fn advance_rounds() {
        let font = MonospaceFont::default();
        assert_eq!(font.advance(10.0), 6);
    }

    #[test]
    fn shared_font_locks() {
        let font = shared(MonospaceFont::new(FontId(9)).with_advance(1.0));
        let width = lock_font(&font).measure("xy", 5.0);
        assert_eq!(width, 10);
        assert_eq!(lock_font(&font).id(), FontId(9));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let font = shared(MonospaceFont::new(FontId(3)));
        let clone = Arc::clone(&font);
        let _ = std::thread::spawn(move || {
            let _guard = clone.lock();
            panic!("poison the lock");
        })
        .join();
        assert!(font.is_poisoned());
        assert_eq!(lock_font(&font).id(), FontId(3));
    }
}
