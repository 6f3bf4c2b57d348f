#![forbid(unsafe_code)]

//! Input: decoding of keyboard, mouse, focus, and query-reply bytes.
//!
//! [`decode`] and [`split`] compose the keyboard and mouse decoders with
//! the right precedence; [`response::decode`] handles replies to the
//! queries in [`query`].

pub mod event;
pub mod key;
pub mod mouse;
pub mod query;
pub mod response;

pub use event::{
    Event, FocusEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use response::TerminalResponse;

/// Decode one input buffer into one event.
///
/// Mouse and focus reports are tried first: they share the `ESC [`
/// introducer with keys, and the key grammar would otherwise shred an SGR
/// report into nonsense characters. Anything that is not a complete mouse
/// report falls through to the key decoder.
pub fn decode(raw: &[u8]) -> Option<Event> {
    mouse::decode(raw).or_else(|| key::decode(raw).map(Event::Key))
}

/// Decode a buffer that may hold several events.
///
/// A buffer that is exactly one mouse or focus report yields that event;
/// otherwise the buffer splits as a key stream, one event per key, with
/// unmapped bytes skipped.
pub fn split(raw: &[u8]) -> Vec<Event> {
    if let Some(event) = mouse::decode(raw) {
        return vec![event];
    }
    key::split(raw).into_iter().map(Event::Key).collect()
}
