#![forbid(unsafe_code)]

//! The text field.
//!
//! A [`Field`] owns a buffer, its wrap output, a viewport, a scrollbar and
//! the input state, and exposes them through one interface used for labels,
//! multi-line displays and single-line inputs alike.
//!
//! Each frame the host feeds events, then calls [`Field::draw`]. Drawing runs
//! [`Field::layout`] first, which folds pending writes, re-wraps only what
//! the dirty state asks for and settles the scroll offset.
//!
//! # Example
//! ```
//! use quire_core::{FontId, Rect};
//! use quire_text::{MonospaceFont, shared};
//! use quire_widgets::{Field, FieldStyle};
//!
//! let font = shared(MonospaceFont::new(FontId(1)).with_advance(1.0));
//! let mut field = Field::new(font, 10.0, FieldStyle::default().with_padding(0));
//! field.set_rect(Rect::new(0, 0, 60, 100));
//! field.write(b"hello world");
//! field.layout();
//! assert_eq!(field.wrapped_lines(), ["hello ", "world"]);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use quire_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use quire_core::{DrawError, Point, Rect, Surface};
use quire_text::{
    Dirty, FontSource, LineMetrics, LineWrapper, SharedFont, TextBuffer, WrapOptions, lock_font,
};

use crate::input::{FieldParts, InputController};
use crate::render::{Paint, RenderContext, RenderPlan, Renderer};
use crate::scrollbar::ScrollBar;
use crate::style::{Align, FieldColors, FieldStyle, HandleBorder};
use crate::viewport::Viewport;

/// Upper bound on wrap passes per layout.
pub const MAX_WRAP_PASSES: usize = 2;

/// Largest accepted font size; larger sizes are clamped.
pub const MAX_FONT_SIZE: f32 = 4096.0;

/// Suffix shown after the content of an input field.
pub const INPUT_SUFFIX: &str = "_";

/// Errors surfaced by a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The host surface rejected a draw call.
    Draw(DrawError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw(err) => write!(f, "draw failed: {err}"),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Draw(err) => Some(err),
        }
    }
}

impl From<DrawError> for FieldError {
    fn from(err: DrawError) -> Self {
        Self::Draw(err)
    }
}

/// A scrollable, wrapping text field.
pub struct Field {
    font: SharedFont,
    size: f32,
    fitted_size: f32,
    style: FieldStyle,
    buffer: TextBuffer,
    wrapper: LineWrapper,
    viewport: Viewport,
    scrollbar: ScrollBar,
    input: InputController,
    metrics: LineMetrics,
    plan: RenderPlan,
    wrap_scrollbar: bool,
    overflow: bool,
    visible: bool,
    auto_resize: bool,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("size", &self.size)
            .field("fitted_size", &self.fitted_size)
            .field("buffer", &self.buffer)
            .field("viewport", &self.viewport)
            .field("scrollbar", &self.scrollbar)
            .field("input", &self.input)
            .field("overflow", &self.overflow)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

fn sanitize_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(1.0, MAX_FONT_SIZE)
    } else {
        1.0
    }
}

impl Field {
    /// Create a read-only field.
    #[must_use]
    pub fn new(font: SharedFont, size: f32, style: FieldStyle) -> Self {
        let size = sanitize_size(size);
        let mut viewport = Viewport::default();
        viewport.set_padding(style.padding);
        viewport.set_follow(style.follow);
        viewport.set_single_line(style.single_line);

        Self {
            font,
            size,
            fitted_size: size,
            input: InputController::new(&style),
            style,
            buffer: TextBuffer::new(),
            wrapper: LineWrapper::new(),
            viewport,
            scrollbar: ScrollBar::new(),
            metrics: LineMetrics::default(),
            plan: RenderPlan::default(),
            wrap_scrollbar: false,
            overflow: false,
            visible: true,
            auto_resize: false,
        }
    }

    /// Create an editable field that handles the keyboard and shows
    /// [`INPUT_SUFFIX`] after its content.
    #[must_use]
    pub fn new_input(font: SharedFont, size: f32, style: FieldStyle) -> Self {
        let mut field = Self::new(font, size, style);
        field.input = InputController::editable(&field.style);
        field.buffer.set_suffix(INPUT_SUFFIX);
        field
    }

    fn mark_layout(&mut self) {
        self.buffer.dirty_mut().mark_layout();
    }

    fn mark_redraw(&mut self) {
        self.buffer.dirty_mut().mark_redraw();
    }

    // --- Content ---

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    /// Replace the final logical line.
    pub fn set_last(&mut self, text: &str) {
        self.buffer.set_last(text);
    }

    /// Append bytes. Never fails; returns the number of bytes accepted.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.buffer.write(bytes)
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.buffer.set_prefix(prefix);
    }

    pub fn set_suffix(&mut self, suffix: &str) {
        self.buffer.set_suffix(suffix);
    }

    // --- Geometry and layout settings ---

    /// Position and size the field.
    pub fn set_rect(&mut self, rect: Rect) {
        if rect == self.viewport.rect() {
            return;
        }
        if self.viewport.set_rect(rect) {
            self.mark_layout();
        } else {
            self.mark_redraw();
        }
    }

    pub fn set_word_wrap(&mut self, word_wrap: bool) {
        if self.style.word_wrap != word_wrap {
            self.style.word_wrap = word_wrap;
            self.mark_layout();
        }
    }

    /// Switch between horizontal scrolling on one line and vertical
    /// scrolling of wrapped lines.
    pub fn set_single_line(&mut self, single_line: bool) {
        if self.style.single_line != single_line {
            self.style.single_line = single_line;
            self.viewport.set_single_line(single_line);
            self.mark_layout();
        }
    }

    /// Scroll to the newest content whenever it changes.
    ///
    /// Turning follow on also jumps to the end right away.
    pub fn set_follow(&mut self, follow: bool) {
        self.style.follow = follow;
        self.viewport.set_follow(follow);
        if follow && self.viewport.scroll_to_end() {
            self.mark_redraw();
        }
    }

    pub fn set_horizontal(&mut self, align: Align) {
        if self.style.horizontal != align {
            self.style.horizontal = align;
            self.mark_layout();
        }
    }

    pub fn set_vertical(&mut self, align: Align) {
        if self.style.vertical != align {
            self.style.vertical = align;
            self.mark_layout();
        }
    }

    pub fn set_padding(&mut self, padding: i32) {
        let padding = padding.max(0);
        if self.style.padding != padding {
            self.style.padding = padding;
            self.viewport.set_padding(padding);
            self.mark_layout();
        }
    }

    /// Draw every character as `mask`, or clear masking with `None`.
    pub fn set_mask(&mut self, mask: Option<char>) {
        if self.style.mask != mask {
            self.style.mask = mask;
            self.mark_redraw();
        }
    }

    /// Replace the font. Cached measurements are dropped.
    pub fn set_font(&mut self, font: SharedFont, size: f32) {
        self.font = font;
        self.size = sanitize_size(size);
        self.fitted_size = self.size;
        self.wrapper.clear_cache();
        self.mark_layout();
    }

    /// Fix the distance between baselines, or use the font's with `None`.
    pub fn set_line_height(&mut self, line_height: Option<i32>) {
        let line_height = line_height.map(|h| h.max(1));
        if self.style.line_height != line_height {
            self.style.line_height = line_height;
            self.mark_layout();
        }
    }

    pub fn set_scrollbar_visible(&mut self, visible: bool) {
        if self.style.scrollbar_visible != visible {
            self.style.scrollbar_visible = visible;
            self.mark_layout();
        }
    }

    pub fn set_scrollbar_auto_hide(&mut self, auto_hide: bool) {
        if self.style.scrollbar_auto_hide != auto_hide {
            self.style.scrollbar_auto_hide = auto_hide;
            self.mark_layout();
        }
    }

    pub fn set_scrollbar_width(&mut self, width: i32) {
        let width = width.max(0);
        if self.style.scrollbar_width != width {
            self.style.scrollbar_width = width;
            self.mark_layout();
        }
    }

    pub fn set_colors(&mut self, colors: FieldColors) {
        if self.style.colors != colors {
            self.style.colors = colors;
            self.mark_redraw();
        }
    }

    pub fn set_handle_border(&mut self, border: HandleBorder) {
        if self.style.handle_border != border {
            self.style.handle_border = border;
            self.mark_redraw();
        }
    }

    /// Hidden fields ignore input and draw nothing.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            if !visible {
                self.input.repeat_mut().stop();
            }
            self.mark_redraw();
        }
    }

    /// Shrink the font until all content fits without scrolling.
    pub fn set_auto_resize(&mut self, auto_resize: bool) {
        if self.auto_resize != auto_resize {
            self.auto_resize = auto_resize;
            self.fitted_size = self.size;
            self.mark_layout();
        }
    }

    // --- Input settings ---

    pub fn set_handle_keyboard(&mut self, handle: bool) {
        self.input.set_handle_keyboard(handle);
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.input.set_editable(editable);
    }

    /// Consulted before each typed character and each deletion.
    pub fn set_changed_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str, char) -> bool + Send + 'static,
    {
        self.input.set_changed_handler(Some(Box::new(handler)));
    }

    /// Called when Enter is pressed.
    pub fn set_confirmed_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) -> bool + Send + 'static,
    {
        self.input.set_confirmed_handler(Some(Box::new(handler)));
    }

    /// Remove both handlers.
    pub fn clear_handlers(&mut self) {
        self.input.set_changed_handler(None);
        self.input.set_confirmed_handler(None);
    }

    /// Delay and interval for a held Backspace.
    pub fn set_key_repeat(&mut self, delay: Duration, interval: Duration) {
        self.style.repeat_delay = delay;
        self.style.repeat_interval = interval;
        self.input.repeat_mut().set_timing(delay, interval);
    }

    // --- Events ---

    fn accepts_input(&self) -> bool {
        self.visible && !self.viewport.rect().is_empty()
    }

    fn split(&mut self) -> (&mut InputController, FieldParts<'_>) {
        (
            &mut self.input,
            FieldParts {
                buffer: &mut self.buffer,
                viewport: &mut self.viewport,
                scrollbar: &mut self.scrollbar,
                style: &self.style,
            },
        )
    }

    fn handled(&mut self, handled: bool) -> bool {
        if handled {
            self.mark_redraw();
        }
        handled
    }

    /// Apply a key and/or a typed character.
    pub fn handle_keyboard_event(
        &mut self,
        key: Option<KeyCode>,
        rune: Option<char>,
    ) -> Result<bool, FieldError> {
        if !self.accepts_input() || !self.input.handles_keyboard() {
            return Ok(false);
        }
        let (input, mut parts) = self.split();
        let mut handled = false;
        if let Some(rune) = rune {
            handled |= input.rune(&mut parts, rune);
        }
        if let Some(key) = key {
            handled |= input.key(&mut parts, key);
        }
        Ok(self.handled(handled))
    }

    /// Apply the pointer state for this frame.
    pub fn handle_mouse_event(
        &mut self,
        point: Point,
        pressed: bool,
        clicked: bool,
    ) -> Result<bool, FieldError> {
        if !self.accepts_input() {
            return Ok(false);
        }
        let (input, mut parts) = self.split();
        let handled = input.mouse(&mut parts, point, pressed, clicked);
        Ok(self.handled(handled))
    }

    /// Apply wheel movement over `point`.
    pub fn handle_wheel_event(&mut self, point: Point, delta: f32) -> Result<bool, FieldError> {
        if !self.accepts_input() || !self.viewport.rect().contains(point) {
            return Ok(false);
        }
        let (input, mut parts) = self.split();
        let handled = input.wheel(&mut parts, delta);
        Ok(self.handled(handled))
    }

    /// Dispatch a canonical event.
    pub fn handle_event(&mut self, event: &Event) -> Result<bool, FieldError> {
        self.handle_event_at(event, Instant::now())
    }

    /// Dispatch a canonical event that happened at `now`.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> Result<bool, FieldError> {
        match event {
            Event::Key(key) => self.handle_key_event(*key, now),
            Event::Rune(rune) => self.handle_keyboard_event(None, Some(*rune)),
            Event::Mouse(mouse) => {
                self.handle_mouse_event(mouse.position, mouse.pressed, mouse.clicked)
            }
            Event::Wheel(wheel) => self.handle_wheel_event(wheel.position, wheel.delta),
            Event::Tick => Ok(self.update(now)),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Result<bool, FieldError> {
        if !self.accepts_input() || !self.input.handles_keyboard() {
            return Ok(false);
        }
        if key.ctrl() {
            return Ok(false);
        }
        let (input, mut parts) = self.split();
        let handled = match key.kind {
            KeyEventKind::Press => input.key_down(&mut parts, key.code, now),
            KeyEventKind::Repeat => input.key(&mut parts, key.code),
            KeyEventKind::Release => {
                input.key_up(key.code);
                false
            }
        };
        Ok(self.handled(handled))
    }

    /// Advance time-based input. Returns whether a held key repeated.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let (input, mut parts) = self.split();
        let handled = input.update(&mut parts, now);
        self.handled(handled)
    }

    // --- Layout and drawing ---

    fn scrollbar_wanted(&self, overflow: bool) -> bool {
        ScrollBar::should_show(
            self.style.single_line,
            self.style.scrollbar_visible && !self.auto_resize,
            self.style.scrollbar_auto_hide,
            overflow,
        )
    }

    fn line_metrics_with(&self, font: &mut dyn FontSource) -> LineMetrics {
        let metrics = font.line_metrics(self.fitted_size);
        LineMetrics {
            height: self.style.line_height.unwrap_or(metrics.height).max(1),
            ascent: metrics.ascent,
        }
    }

    fn wrap_pass(&mut self, font: &mut dyn FontSource, scrollbar: bool) {
        if scrollbar != self.wrap_scrollbar {
            self.wrap_scrollbar = scrollbar;
            self.mark_layout();
        }
        let width = self.style.text_width(self.viewport.rect().width, scrollbar);
        let options = WrapOptions::new(width, self.fitted_size)
            .word_wrap(self.style.word_wrap)
            .single_line(self.style.single_line);
        self.wrapper.wrap(&mut self.buffer, font, &options);

        let size = if self.style.single_line {
            self.wrapper.line_widths().first().copied().unwrap_or(0)
        } else {
            let lines = i32::try_from(self.wrapper.len()).unwrap_or(i32::MAX);
            self.metrics.height.saturating_mul(lines)
        };
        self.viewport.set_buffer_size(size);
    }

    /// Largest size not above the configured one at which every logical
    /// line fits the text width and all lines fit the text height.
    ///
    /// Below the configured size only whole sizes are tried, down to 1.
    fn fit_size(&mut self, font: &mut dyn FontSource) {
        let rect = self.viewport.rect();
        let width = self.style.text_width(rect.width, false);
        let height = rect.height - self.style.padding * 2;
        let mut fits = |size: f32, buffer: &mut TextBuffer| {
            fits_at(buffer, &self.style, &mut *font, size, width, height)
        };

        let size = if fits(self.size, &mut self.buffer) {
            self.size
        } else {
            // Invariant: `lo` fits (or is 1), `hi` does not.
            let (mut lo, mut hi) = (1u32, self.size.ceil() as u32);
            while hi - lo > 1 {
                let mid = lo + (hi - lo) / 2;
                if fits(mid as f32, &mut self.buffer) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            lo as f32
        };
        if size != self.fitted_size {
            quire_core::debug!(from = self.fitted_size, to = size, "auto-resized font");
            self.fitted_size = size;
            self.mark_layout();
        }
    }

    /// Fold pending writes, re-wrap what is dirty and settle scrolling.
    pub fn layout(&mut self) {
        self.buffer.process_incoming();
        let rect = self.viewport.rect();
        if rect.is_empty() {
            return;
        }

        let _span = quire_core::debug_span!(
            "field_layout",
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height
        )
        .entered();

        let shared = Arc::clone(&self.font);
        let mut font = lock_font(&shared);
        if self.auto_resize && self.buffer.dirty().wrap_from().is_some() {
            self.fit_size(&mut *font);
        }
        self.metrics = self.line_metrics_with(&mut *font);

        let mut scrollbar = self.scrollbar_wanted(self.overflow);
        for pass in 1..=MAX_WRAP_PASSES {
            self.wrap_pass(&mut *font, scrollbar);
            let wanted = self.scrollbar_wanted(self.viewport.overflows());
            if wanted == scrollbar {
                break;
            }
            if pass == MAX_WRAP_PASSES {
                quire_core::error!(
                    passes = MAX_WRAP_PASSES,
                    scrollbar,
                    wanted,
                    "scrollbar visibility did not settle"
                );
                break;
            }
            scrollbar = wanted;
        }
        drop(font);

        let changed = self.buffer.take_modified();
        self.viewport.settle(changed);
        self.scrollbar.layout(
            rect,
            self.style.scrollbar_width,
            scrollbar,
            self.viewport.progress(),
        );

        let ctx = RenderContext {
            rect,
            text_width: rect.width - if scrollbar { self.scrollbar.track().width } else { 0 },
            padding: self.style.padding,
            line: self.metrics,
            offset: self.viewport.offset(),
            single_line: self.style.single_line,
            suffix: self.buffer.suffix(),
            wrapped: self.wrapper.wrapped(),
            widths: self.wrapper.line_widths(),
        };
        self.plan = Renderer::from_style(&self.style).plan(&ctx);
        self.overflow = self.plan.overflow;
    }

    /// Lay out and draw onto `surface`.
    ///
    /// A failed draw leaves content and wrap state untouched and keeps the
    /// field marked for redraw.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), FieldError> {
        if !self.visible {
            return Ok(());
        }
        self.layout();
        let rect = self.viewport.rect();
        if rect.is_empty() {
            return Ok(());
        }

        let _span = quire_core::debug_span!(
            "field_draw",
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            runs = self.plan.runs.len()
        )
        .entered();

        let font = lock_font(&self.font).id();
        let paint = Paint {
            rect,
            font,
            size: self.fitted_size,
            colors: self.style.colors,
            handle_border: self.style.handle_border,
            scrollbar: &self.scrollbar,
        };
        match Renderer::from_style(&self.style).draw(surface, &self.plan, &paint) {
            Ok(()) => {
                self.buffer.dirty_mut().finish_draw();
                Ok(())
            }
            Err(err) => {
                quire_core::warn!(error = %err, "field draw failed");
                self.mark_redraw();
                Err(err.into())
            }
        }
    }

    // --- Queries ---

    /// Full content with lines joined by `\n`.
    pub fn text(&mut self) -> String {
        self.buffer.text()
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.viewport.rect()
    }

    /// Distance between baselines at the current font size.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        match self.style.line_height {
            Some(height) => height,
            None => lock_font(&self.font).line_metrics(self.fitted_size).height.max(1),
        }
    }

    #[must_use]
    pub fn offset(&self) -> i32 {
        self.viewport.offset()
    }

    #[must_use]
    pub fn min_offset(&self) -> i32 {
        self.viewport.min_offset()
    }

    /// Visual lines as of the last layout.
    #[must_use]
    pub fn wrapped_lines(&self) -> &[String] {
        self.wrapper.wrapped()
    }

    /// Pixel width of each visual line as of the last layout.
    #[must_use]
    pub fn line_widths(&self) -> &[i32] {
        self.wrapper.line_widths()
    }

    #[must_use]
    pub fn scrollbar(&self) -> &ScrollBar {
        &self.scrollbar
    }

    /// Whether content extended past the field at the last layout.
    #[must_use]
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Line placement from the last layout.
    #[must_use]
    pub fn render_plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// Font size in use; smaller than configured when auto-resize shrank it.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.fitted_size
    }

    #[must_use]
    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    #[must_use]
    pub fn dirty(&self) -> Dirty {
        self.buffer.dirty()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.input.is_editable()
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.buffer.prefix()
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        self.buffer.suffix()
    }
}

fn fits_at(
    buffer: &mut TextBuffer,
    style: &FieldStyle,
    font: &mut dyn FontSource,
    size: f32,
    width: i32,
    height: i32,
) -> bool {
    let line_height = style
        .line_height
        .unwrap_or_else(|| font.line_metrics(size).height)
        .max(1);
    let prefix = buffer.prefix().to_owned();
    let suffix = buffer.suffix().to_owned();
    let lines = buffer.lines();

    if style.single_line {
        let text = format!("{prefix}{}{suffix}", lines.concat());
        return line_height <= height && font.measure(&text, size) <= width;
    }

    let rows = i32::try_from(lines.len().max(1)).unwrap_or(i32::MAX);
    if line_height.saturating_mul(rows) > height {
        return false;
    }
    let last = lines.len().saturating_sub(1);
    lines.iter().enumerate().all(|(i, line)| {
        let mut text = String::new();
        if i == 0 {
            text.push_str(&prefix);
        }
        text.push_str(line);
        if i == last {
            text.push_str(&suffix);
        }
        font.measure(&text, size) <= width
    })
}
