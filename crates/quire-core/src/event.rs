#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their windowing-system input into these types before
//! handing it to a field. All events derive `Clone` and `PartialEq` for use
//! in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are pixels in the same space as field rectangles
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//! - `Modifiers` is a bitflags set; fields only look at Ctrl
//! - Printable input arrives as [`Event::Rune`], separate from key codes

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A printable character produced by the host's text input.
    Rune(char),

    /// A pointer event.
    Mouse(MouseEvent),

    /// Wheel movement at a pointer position.
    Wheel(WheelEvent),

    /// A tick event from the host loop.
    Tick,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Text is taken from [`Event::Rune`] only, so
    /// character keys never edit a field.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Enter key on the numeric keypad.
    KpEnter,

    /// Backspace key.
    Backspace,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0b0000;
        /// Control key. Fields leave Ctrl chords to the host.
        const CTRL = 0b0001;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Pointer state sampled by the host once per frame.
///
/// `pressed` is the primary button's held state; `clicked` is set on the
/// frame the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEvent {
    /// Pointer position in pixels.
    pub position: Point,

    /// Primary button is held.
    pub pressed: bool,

    /// Primary button went down this frame.
    pub clicked: bool,
}

impl MouseEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(position: Point, pressed: bool, clicked: bool) -> Self {
        Self {
            position,
            pressed,
            clicked,
        }
    }

    /// Pointer pressed down this frame.
    #[must_use]
    pub const fn press(position: Point) -> Self {
        Self::new(position, true, true)
    }

    /// Pointer held and moved.
    #[must_use]
    pub const fn drag(position: Point) -> Self {
        Self::new(position, true, false)
    }

    /// Pointer released or hovering.
    #[must_use]
    pub const fn release(position: Point) -> Self {
        Self::new(position, false, false)
    }
}

/// Wheel movement. Positive `delta` scrolls content toward its start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Pointer position in pixels.
    pub position: Point,

    /// Wheel ticks; fractional values come from high-resolution devices.
    pub delta: f32,
}

impl WheelEvent {
    /// Create a new wheel event.
    #[must_use]
    pub const fn new(position: Point, delta: f32) -> Self {
        Self { position, delta }
    }
}
