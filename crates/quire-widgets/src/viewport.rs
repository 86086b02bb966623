#![forbid(unsafe_code)]

//! Scroll state of a field.
//!
//! The offset is a signed pixel shift applied to every line: vertical for
//! multi-line fields, horizontal for single-line ones. It is never positive
//! and never below [`Viewport::min_offset`], the shift that brings the end of
//! the content to the far edge of the field.
//!
//! Mutating methods return whether the offset changed so callers know when
//! a redraw is due.

use quire_core::Rect;

/// Pixel bounds and scroll offset of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    rect: Rect,
    offset: i32,
    single_line: bool,
    follow: bool,
    buffer_size: i32,
    padding: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            offset: 0,
            single_line: false,
            follow: true,
            buffer_size: 0,
            padding: 0,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize. Returns whether the size changed.
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        let resized = !self.rect.same_size(&rect);
        self.rect = rect;
        if resized {
            self.clamp_offset();
        }
        resized
    }

    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    /// Set the offset, clamped into range.
    pub fn set_offset(&mut self, offset: i32) -> bool {
        let old = self.offset;
        self.offset = offset;
        self.clamp_offset();
        old != self.offset
    }

    #[must_use]
    pub const fn single_line(&self) -> bool {
        self.single_line
    }

    /// Switch scroll axis. The offset resets to the start.
    pub fn set_single_line(&mut self, single_line: bool) {
        if self.single_line != single_line {
            self.single_line = single_line;
            self.offset = 0;
        }
    }

    #[must_use]
    pub const fn follow(&self) -> bool {
        self.follow
    }

    pub fn set_follow(&mut self, follow: bool) {
        self.follow = follow;
    }

    /// Pixel extent of wrapped content along the scroll axis.
    #[must_use]
    pub const fn buffer_size(&self) -> i32 {
        self.buffer_size
    }

    pub fn set_buffer_size(&mut self, size: i32) {
        self.buffer_size = size.max(0);
    }

    #[must_use]
    pub const fn padding(&self) -> i32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding.max(0);
    }

    /// Size of the field along the scroll axis.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        if self.single_line {
            self.rect.width
        } else {
            self.rect.height
        }
    }

    /// Smallest allowed offset.
    #[must_use]
    pub fn min_offset(&self) -> i32 {
        let overhang = i64::from(self.buffer_size) - i64::from(self.extent())
            + i64::from(self.padding) * 2;
        let min = (-overhang).min(0);
        i32::try_from(min).unwrap_or(i32::MIN)
    }

    /// Whether content is larger than the field.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.min_offset() < 0
    }

    /// Clamp the offset into `[min_offset, 0]`.
    pub fn clamp_offset(&mut self) -> bool {
        let clamped = self.offset.clamp(self.min_offset(), 0);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Shift by `delta` pixels. Positive values move toward the start.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        self.set_offset(self.offset.saturating_add(delta))
    }

    pub fn scroll_to_start(&mut self) -> bool {
        self.set_offset(0)
    }

    pub fn scroll_to_end(&mut self) -> bool {
        self.set_offset(self.min_offset())
    }

    /// Reposition after a layout pass: jump to the end when content changed
    /// in follow mode, otherwise keep the offset in range.
    pub fn settle(&mut self, content_changed: bool) -> bool {
        if content_changed && self.follow {
            self.scroll_to_end()
        } else {
            self.clamp_offset()
        }
    }

    /// Scroll position as a fraction of the scrollable range.
    ///
    /// 0.0 at the start, 1.0 at the end, 0.0 when nothing scrolls.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let min = self.min_offset();
        if min == 0 {
            return 0.0;
        }
        (self.offset as f32 / min as f32).clamp(0.0, 1.0)
    }

    /// Inverse of [`Viewport::progress`].
    pub fn set_progress(&mut self, progress: f32) -> bool {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let offset = (self.min_offset() as f32 * progress).round() as i32;
        self.set_offset(offset)
    }
}
