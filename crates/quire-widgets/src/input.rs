#![forbid(unsafe_code)]

//! Keyboard, pointer and wheel handling.
//!
//! [`InputController`] turns input into buffer edits and scroll changes. It
//! works on a borrowed [`FieldParts`] so the field keeps ownership of its
//! state, and every handler returns whether it did anything.
//!
//! Held keys are not driven by a timer. [`KeyRepeat`] remembers which key is
//! down and is polled once per frame.

use std::fmt;
use std::time::{Duration, Instant};

use quire_core::Point;
use quire_core::event::KeyCode;
use quire_text::TextBuffer;

use crate::scrollbar::{ScrollBar, ScrollBarHit};
use crate::style::FieldStyle;
use crate::viewport::Viewport;

/// Called with the text as it would read after an edit and the rune being
/// added (`'\0'` for a deletion). Returning `false` rejects the edit.
pub type ChangedHandler = Box<dyn FnMut(&str, char) -> bool + Send>;

/// Called with the current text when Enter is pressed. Returning `true`
/// clears the field.
pub type ConfirmedHandler = Box<dyn FnMut(&str) -> bool + Send>;

/// The parts of a field input acts on.
pub struct FieldParts<'a> {
    pub buffer: &'a mut TextBuffer,
    pub viewport: &'a mut Viewport,
    pub scrollbar: &'a mut ScrollBar,
    pub style: &'a FieldStyle,
}

/// Polled auto-repeat for one held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    delay: Duration,
    interval: Duration,
    held: Option<(KeyCode, Instant)>,
}

impl KeyRepeat {
    #[must_use]
    pub const fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            held: None,
        }
    }

    /// Change timings. A held key keeps its current deadline.
    pub fn set_timing(&mut self, delay: Duration, interval: Duration) {
        self.delay = delay;
        self.interval = interval;
    }

    /// `code` went down at `now`; it first repeats after the delay.
    pub fn press(&mut self, code: KeyCode, now: Instant) {
        self.held = Some((code, now + self.delay));
    }

    /// `code` went up. Releasing a different key changes nothing.
    pub fn release(&mut self, code: KeyCode) {
        if self.held.is_some_and(|(held, _)| held == code) {
            self.held = None;
        }
    }

    pub fn stop(&mut self) {
        self.held = None;
    }

    #[must_use]
    pub fn held(&self) -> Option<KeyCode> {
        self.held.map(|(code, _)| code)
    }

    /// The key to repeat at `now`, if its deadline has passed.
    ///
    /// Yields at most one repeat per call; a late poll does not catch up on
    /// missed intervals.
    pub fn poll(&mut self, now: Instant) -> Option<KeyCode> {
        let (code, due) = self.held?;
        if now < due {
            return None;
        }
        self.held = Some((code, now + self.interval));
        Some(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContentDrag {
    anchor: Point,
    start_offset: i32,
}

/// Input handling state of a field.
pub struct InputController {
    changed: Option<ChangedHandler>,
    confirmed: Option<ConfirmedHandler>,
    handle_keyboard: bool,
    editable: bool,
    content_drag: Option<ContentDrag>,
    repeat: KeyRepeat,
}

impl fmt::Debug for InputController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputController")
            .field("changed", &self.changed.is_some())
            .field("confirmed", &self.confirmed.is_some())
            .field("handle_keyboard", &self.handle_keyboard)
            .field("editable", &self.editable)
            .field("content_drag", &self.content_drag)
            .field("repeat", &self.repeat)
            .finish()
    }
}

impl InputController {
    /// A controller that ignores the keyboard.
    #[must_use]
    pub fn new(style: &FieldStyle) -> Self {
        Self {
            changed: None,
            confirmed: None,
            handle_keyboard: false,
            editable: false,
            content_drag: None,
            repeat: KeyRepeat::new(style.repeat_delay, style.repeat_interval),
        }
    }

    /// A controller for an editable input.
    #[must_use]
    pub fn editable(style: &FieldStyle) -> Self {
        Self {
            handle_keyboard: true,
            editable: true,
            ..Self::new(style)
        }
    }

    pub fn set_changed_handler(&mut self, handler: Option<ChangedHandler>) {
        self.changed = handler;
    }

    pub fn set_confirmed_handler(&mut self, handler: Option<ConfirmedHandler>) {
        self.confirmed = handler;
    }

    #[must_use]
    pub const fn handles_keyboard(&self) -> bool {
        self.handle_keyboard
    }

    pub fn set_handle_keyboard(&mut self, handle: bool) {
        self.handle_keyboard = handle;
        if !handle {
            self.repeat.stop();
        }
    }

    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.repeat.stop();
        }
    }

    #[must_use]
    pub const fn repeat(&self) -> &KeyRepeat {
        &self.repeat
    }

    pub fn repeat_mut(&mut self) -> &mut KeyRepeat {
        &mut self.repeat
    }

    /// Handle one key press. Character keys are not handled; text arrives
    /// through [`InputController::rune`].
    pub fn key(&mut self, parts: &mut FieldParts<'_>, code: KeyCode) -> bool {
        if !self.handle_keyboard {
            return false;
        }
        match code {
            KeyCode::Backspace if self.editable => self.backspace(parts),
            KeyCode::Enter | KeyCode::KpEnter if self.editable => self.enter(parts),
            KeyCode::PageUp => {
                parts.viewport.scroll_by(parts.style.page_step);
                true
            }
            KeyCode::PageDown => {
                parts.viewport.scroll_by(-parts.style.page_step);
                true
            }
            KeyCode::Home => {
                parts.viewport.scroll_to_start();
                true
            }
            KeyCode::End => {
                parts.viewport.scroll_to_end();
                true
            }
            _ => false,
        }
    }

    /// A key went down. Backspace starts repeating after the delay.
    pub fn key_down(&mut self, parts: &mut FieldParts<'_>, code: KeyCode, now: Instant) -> bool {
        let handled = self.key(parts, code);
        if handled && code == KeyCode::Backspace {
            self.repeat.press(code, now);
        }
        handled
    }

    /// A key went up.
    pub fn key_up(&mut self, code: KeyCode) {
        self.repeat.release(code);
    }

    /// Apply a due key repeat.
    pub fn update(&mut self, parts: &mut FieldParts<'_>, now: Instant) -> bool {
        match self.repeat.poll(now) {
            Some(code) => self.key(parts, code),
            None => false,
        }
    }

    /// Handle one typed character.
    pub fn rune(&mut self, parts: &mut FieldParts<'_>, rune: char) -> bool {
        if !self.handle_keyboard || !self.editable || rune.is_control() {
            return false;
        }
        if let Some(changed) = self.changed.as_mut() {
            let mut pending = parts.buffer.text();
            pending.push(rune);
            if !changed(&pending, rune) {
                return false;
            }
        }
        let mut bytes = [0; 4];
        parts.buffer.write(rune.encode_utf8(&mut bytes).as_bytes());
        true
    }

    fn backspace(&mut self, parts: &mut FieldParts<'_>) -> bool {
        if parts.buffer.is_empty() && parts.buffer.line_count() <= 1 {
            return false;
        }
        if let Some(changed) = self.changed.as_mut() {
            let pending = parts.buffer.text_without_last_char();
            if !changed(&pending, '\0') {
                return false;
            }
        }
        parts.buffer.pop_char()
    }

    fn enter(&mut self, parts: &mut FieldParts<'_>) -> bool {
        if let Some(confirmed) = self.confirmed.as_mut() {
            let text = parts.buffer.text();
            if confirmed(&text) {
                parts.buffer.clear();
            }
            return true;
        }
        if parts.style.single_line {
            return false;
        }
        parts.buffer.push_newline();
        true
    }

    /// Handle wheel movement. Positive `delta` scrolls toward the start.
    pub fn wheel(&mut self, parts: &mut FieldParts<'_>, delta: f32) -> bool {
        if delta.is_nan() || delta == 0.0 {
            return false;
        }
        let max = parts.style.max_wheel_ticks.abs();
        let ticks = delta.max(-max).min(max);
        let pixels = (ticks * parts.style.wheel_step as f32).round() as i32;
        parts.viewport.scroll_by(pixels)
    }

    /// Handle the pointer state for one frame.
    pub fn mouse(&mut self, parts: &mut FieldParts<'_>, point: Point, pressed: bool, clicked: bool) -> bool {
        if !pressed {
            let released_bar = parts.scrollbar.release();
            let released_content = self.content_drag.take().is_some();
            return released_bar || released_content;
        }

        if clicked {
            return self.press(parts, point);
        }

        if let Some(progress) = parts.scrollbar.drag_to(point) {
            parts.viewport.set_progress(progress);
            return true;
        }
        if let Some(drag) = self.content_drag {
            let delta = if parts.viewport.single_line() {
                point.x - drag.anchor.x
            } else {
                point.y - drag.anchor.y
            };
            parts.viewport.set_offset(drag.start_offset.saturating_add(delta));
            return true;
        }
        false
    }

    fn press(&mut self, parts: &mut FieldParts<'_>, point: Point) -> bool {
        match parts.scrollbar.press(point) {
            Some(ScrollBarHit::Track(progress)) => {
                parts.viewport.set_progress(progress);
                true
            }
            Some(ScrollBarHit::Handle) => true,
            None if parts.viewport.rect().contains(point) => {
                self.content_drag = Some(ContentDrag {
                    anchor: point,
                    start_offset: parts.viewport.offset(),
                });
                true
            }
            None => false,
        }
    }

    /// Whether the pointer is captured by a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.content_drag.is_some()
    }
}
