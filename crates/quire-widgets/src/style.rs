#![forbid(unsafe_code)]

//! Field configuration.
//!
//! A [`FieldStyle`] is a plain value handed to a field at construction. There
//! is no process-wide default style: hosts that want a shared theme keep one
//! `FieldStyle` and clone it.

use std::time::Duration;

use quire_core::Color;

/// Default space between the field edge and its text, in pixels.
pub const DEFAULT_PADDING: i32 = 5;
/// Default scrollbar width, in pixels.
pub const DEFAULT_SCROLLBAR_WIDTH: i32 = 32;
/// Default wheel scroll per tick, in pixels.
pub const DEFAULT_WHEEL_STEP: i32 = 25;
/// Default cap on wheel ticks applied from one event.
pub const DEFAULT_MAX_WHEEL_TICKS: f32 = 3.0;
/// Default PageUp/PageDown scroll, in pixels.
pub const DEFAULT_PAGE_STEP: i32 = 100;
/// Default delay before a held key starts repeating.
pub const DEFAULT_REPEAT_DELAY: Duration = Duration::from_millis(500);
/// Default interval between repeats of a held key.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(75);

/// Placement of text along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Left or top.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right or bottom.
    End,
}

/// Fill colors of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldColors {
    /// Text color.
    pub text: Color,
    /// Background; transparent skips the fill.
    pub background: Color,
    /// Scrollbar track.
    pub scroll_area: Color,
    /// Scrollbar handle.
    pub scroll_handle: Color,
}

impl Default for FieldColors {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            background: Color::WHITE,
            scroll_area: Color::rgb(200, 200, 200),
            scroll_handle: Color::rgb(108, 108, 108),
        }
    }
}

/// Border drawn inside the scrollbar handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HandleBorder {
    /// Border thickness in pixels; 0 draws nothing.
    pub size: i32,
    pub top: Color,
    pub right: Color,
    pub bottom: Color,
    pub left: Color,
}

impl HandleBorder {
    /// Same color on every side.
    #[must_use]
    pub const fn uniform(size: i32, color: Color) -> Self {
        Self {
            size,
            top: color,
            right: color,
            bottom: color,
            left: color,
        }
    }
}

/// Everything configurable about a field except its font and content.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStyle {
    pub colors: FieldColors,
    pub handle_border: HandleBorder,
    /// Space between the field edge and its text.
    pub padding: i32,
    pub scrollbar_width: i32,
    /// Show the scrollbar at all.
    pub scrollbar_visible: bool,
    /// Hide the scrollbar while content fits.
    pub scrollbar_auto_hide: bool,
    /// Fixed distance between baselines. `None` uses the font's metrics.
    pub line_height: Option<i32>,
    pub horizontal: Align,
    pub vertical: Align,
    pub word_wrap: bool,
    pub single_line: bool,
    /// Scroll to the newest content whenever it changes.
    pub follow: bool,
    /// Draw every character as this rune.
    pub mask: Option<char>,
    pub wheel_step: i32,
    pub max_wheel_ticks: f32,
    pub page_step: i32,
    pub repeat_delay: Duration,
    pub repeat_interval: Duration,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            colors: FieldColors::default(),
            handle_border: HandleBorder::default(),
            padding: DEFAULT_PADDING,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            scrollbar_visible: true,
            scrollbar_auto_hide: true,
            line_height: None,
            horizontal: Align::Start,
            vertical: Align::Start,
            word_wrap: true,
            single_line: false,
            follow: true,
            mask: None,
            wheel_step: DEFAULT_WHEEL_STEP,
            max_wheel_ticks: DEFAULT_MAX_WHEEL_TICKS,
            page_step: DEFAULT_PAGE_STEP,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

impl FieldStyle {
    /// Create the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    #[must_use]
    pub fn with_colors(mut self, colors: FieldColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.colors.text = color;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.colors.background = color;
        self
    }

    #[must_use]
    pub fn with_handle_border(mut self, border: HandleBorder) -> Self {
        self.handle_border = border;
        self
    }

    /// Negative values are treated as 0.
    #[must_use]
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding.max(0);
        self
    }

    #[must_use]
    pub fn with_scrollbar_width(mut self, width: i32) -> Self {
        self.scrollbar_width = width.max(0);
        self
    }

    #[must_use]
    pub fn with_scrollbar_visible(mut self, visible: bool) -> Self {
        self.scrollbar_visible = visible;
        self
    }

    #[must_use]
    pub fn with_scrollbar_auto_hide(mut self, auto_hide: bool) -> Self {
        self.scrollbar_auto_hide = auto_hide;
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height: Option<i32>) -> Self {
        self.line_height = line_height.map(|h| h.max(1));
        self
    }

    #[must_use]
    pub fn with_horizontal(mut self, align: Align) -> Self {
        self.horizontal = align;
        self
    }

    #[must_use]
    pub fn with_vertical(mut self, align: Align) -> Self {
        self.vertical = align;
        self
    }

    #[must_use]
    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    #[must_use]
    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    #[must_use]
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: Option<char>) -> Self {
        self.mask = mask;
        self
    }

    /// Wheel scroll per tick and the per-event tick cap.
    #[must_use]
    pub fn with_wheel(mut self, step: i32, max_ticks: f32) -> Self {
        self.wheel_step = step;
        self.max_wheel_ticks = max_ticks.abs();
        self
    }

    #[must_use]
    pub fn with_page_step(mut self, step: i32) -> Self {
        self.page_step = step;
        self
    }

    /// Key repeat timing for held Backspace.
    #[must_use]
    pub fn with_key_repeat(mut self, delay: Duration, interval: Duration) -> Self {
        self.repeat_delay = delay;
        self.repeat_interval = interval;
        self
    }

    /// Space available to text inside a field `width` pixels wide.
    #[must_use]
    pub fn text_width(&self, width: i32, scrollbar_shown: bool) -> i32 {
        let bar = if scrollbar_shown { self.scrollbar_width } else { 0 };
        width.saturating_sub(bar).saturating_sub(self.padding * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let style = FieldStyle::default();
        assert_eq!(style.padding, 5);
        assert_eq!(style.scrollbar_width, 32);
        assert_eq!(style.wheel_step, 25);
        assert_eq!(style.page_step, 100);
        assert_eq!(style.repeat_delay, Duration::from_millis(500));
        assert_eq!(style.repeat_interval, Duration::from_millis(75));
        assert!(style.word_wrap && style.follow);
        assert!(style.scrollbar_visible && style.scrollbar_auto_hide);
        assert!(!style.single_line);
        assert_eq!(style.colors.scroll_area, Color::rgb(200, 200, 200));
    }

    #[test]
    fn builder_chain() {
        let style = FieldStyle::new()
            .with_padding(-3)
            .with_single_line(true)
            .with_mask(Some('*'))
            .with_line_height(Some(0))
            .with_horizontal(Align::Center);
        assert_eq!(style.padding, 0);
        assert!(style.single_line);
        assert_eq!(style.mask, Some('*'));
        assert_eq!(style.line_height, Some(1));
        assert_eq!(style.horizontal, Align::Center);
    }

    #[test]
    fn text_width_subtracts_padding_and_scrollbar() {
        let style = FieldStyle::default();
        assert_eq!(style.text_width(200, false), 190);
        assert_eq!(style.text_width(200, true), 158);
        assert_eq!(style.text_width(20, true), -22);
    }

    #[test]
    fn uniform_border() {
        let border = HandleBorder::uniform(2, Color::BLACK);
        assert_eq!(border.left, border.right);
        assert_eq!(border.size, 2);
    }
}
