#![forbid(unsafe_code)]

//! Typed input events decoded from the terminal byte stream.
//!
//! Design notes:
//! - Events are plain data; decoding logic lives in [`crate::key`] and
//!   [`crate::mouse`]
//! - `Modifiers` use bitflags for easy combination
//! - `KeyEvent` keeps the exact wire bytes it was decoded from, so callers
//!   can log or replay sequences the engine did not recognize

use std::borrow::Cow;

use bitflags::bitflags;
use smallvec::SmallVec;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Terminal gained or lost focus.
    Focus(FocusEvent),
}

bitflags! {
    /// Modifier keys observed in an input sequence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b000;
        /// Shift key.
        const SHIFT = 0b001;
        /// Meta: the Alt/Option key, or an ESC prefix on the wire.
        const META  = 0b010;
        /// Control key.
        const CTRL  = 0b100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Decode an xterm modifier parameter (`value = 1 + shift(1) + alt(2) +
    /// ctrl(4)`, with 8 as an alternate meta bit).
    #[must_use]
    pub fn from_xterm(value: u32) -> Self {
        let bits = value.saturating_sub(1);
        let mut mods = Self::NONE;
        if bits & 1 != 0 {
            mods |= Self::SHIFT;
        }
        if bits & 0b1010 != 0 {
            mods |= Self::META;
        }
        if bits & 0b100 != 0 {
            mods |= Self::CTRL;
        }
        mods
    }
}

/// The closed set of key names.
///
/// Escapes that parse cleanly but match no known vendor code decode to
/// [`Undefined`](Self::Undefined); the raw code travels on the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character. Uppercase letters keep their case and set
    /// [`Modifiers::SHIFT`]; Ctrl+letter carries the lowercase letter.
    Char(char),
    /// Carriage return (0x0D).
    Enter,
    /// Line feed (0x0A).
    Linefeed,
    /// Horizontal tab; Shift+Tab arrives as `CSI Z` with SHIFT set.
    Tab,
    /// Backspace (0x08 or 0x7F).
    Backspace,
    /// The Escape key.
    Escape,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Insert.
    Insert,
    /// Delete (the `CSI 3~` key, not 0x7F).
    Delete,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Keypad center / "begin" (`CSI E`).
    Clear,
    /// Function key (1-indexed).
    F(u8),
    /// Well-formed escape with an unknown vendor code.
    Undefined,
}

/// Inline capacity for key sequences; the longest common escape
/// (`ESC ESC [ 2 4 ; 2 ~`) is 8 bytes, leaving room for wide modifier
/// parameters before anything spills.
type RawBytes = SmallVec<[u8; 12]>;

/// A decoded keyboard event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Decoded key name.
    pub code: KeyCode,

    /// Modifier keys observed in the sequence.
    pub modifiers: Modifiers,

    /// Vendor escape code (`[15~`, `OP`, ...) for function/navigation
    /// escapes, including ones that decode to [`KeyCode::Undefined`].
    pub escape: Option<String>,

    /// The exact wire bytes this event was decoded from.
    pub raw: RawBytes,
}

impl KeyEvent {
    /// Event with no modifiers and no wire bytes attached.
    #[must_use]
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            escape: None,
            raw: RawBytes::new(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub(crate) fn from_wire(code: KeyCode, modifiers: Modifiers, raw: &[u8]) -> Self {
        Self {
            code,
            modifiers,
            escape: None,
            raw: RawBytes::from_slice(raw),
        }
    }

    /// The wire bytes as text (lossy for non-UTF-8 input).
    #[must_use]
    pub fn sequence(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Whether CTRL was held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether Meta/Alt was held (or the sequence carried an ESC prefix).
    #[must_use]
    pub fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }

    /// Whether SHIFT was held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this is a plain character key (no CTRL/META).
    #[must_use]
    pub fn is_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::META)
    }
}

/// A decoded mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// X coordinate (0-indexed, leftmost column is 0).
    pub x: u16,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while a button is held.
    Drag(MouseButton),

    /// Mouse moved with no button pressed.
    Moved,

    /// Scroll wheel up.
    ScrollUp,

    /// Scroll wheel down.
    ScrollDown,

    /// Scroll wheel left.
    ScrollLeft,

    /// Scroll wheel right.
    ScrollRight,
}

/// Mouse buttons.
///
/// X10 and URXVT releases erase the button identity on the wire (code 3);
/// those decode to [`None`](Self::None).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Middle button (wheel click).
    Middle,
    /// Right button.
    Right,
    /// No identifiable button.
    None,
}

/// Terminal focus change (`CSI I` / `CSI O`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusEvent {
    /// True when the terminal gained focus.
    pub gained: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_builders() {
        let event = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::SHIFT);
        assert_eq!(event.code, KeyCode::Up);
        assert!(event.shift());
        assert!(!event.ctrl());
        assert!(event.raw.is_empty());
    }

    #[test]
    fn is_char_excludes_ctrl_and_meta() {
        assert!(KeyEvent::new(KeyCode::Char('a')).is_char());
        assert!(
            KeyEvent::new(KeyCode::Char('A'))
                .with_modifiers(Modifiers::SHIFT)
                .is_char()
        );
        assert!(
            !KeyEvent::new(KeyCode::Char('a'))
                .with_modifiers(Modifiers::CTRL)
                .is_char()
        );
        assert!(!KeyEvent::new(KeyCode::Enter).is_char());
    }

    #[test]
    fn sequence_is_lossy_view_of_raw() {
        let event = KeyEvent::from_wire(KeyCode::Up, Modifiers::NONE, b"\x1b[A");
        assert_eq!(event.sequence(), "\x1b[A");
    }

    #[test]
    fn modifiers_from_xterm_values() {
        assert_eq!(Modifiers::from_xterm(1), Modifiers::NONE);
        assert_eq!(Modifiers::from_xterm(2), Modifiers::SHIFT);
        assert_eq!(Modifiers::from_xterm(3), Modifiers::META);
        assert_eq!(Modifiers::from_xterm(5), Modifiers::CTRL);
        assert_eq!(Modifiers::from_xterm(6), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(
            Modifiers::from_xterm(8),
            Modifiers::SHIFT | Modifiers::META | Modifiers::CTRL
        );
        // 9 encodes the alternate meta bit
        assert_eq!(Modifiers::from_xterm(9), Modifiers::META);
        // 0 and 1 both mean "none"
        assert_eq!(Modifiers::from_xterm(0), Modifiers::NONE);
    }

    #[test]
    fn mouse_event_builders() {
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 7)
            .with_modifiers(Modifiers::CTRL);
        assert_eq!(event.position(), (3, 7));
        assert!(event.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
