#![forbid(unsafe_code)]

//! Termwire public facade crate.
//!
//! This crate provides the stable surface area for users: it re-exports the
//! common types from the input and output crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use termwire::prelude::*;
//!
//! // Decode one wire event.
//! let event = termwire::input::decode(b"\x1b[A");
//! assert!(matches!(event, Some(Event::Key(key)) if key.code == KeyCode::Up));
//!
//! // Encode a styled frame against tracked state.
//! let mut encoder = OutputEncoder::new(Vec::new(), 80);
//! encoder.move_cursor(0, 0);
//! encoder.set_attributes(StyleAttrs::BOLD);
//! encoder.write_str("hello");
//! let bytes = encoder.into_inner()?;
//! assert!(bytes.starts_with(b"\x1b[1;1H\x1b[1m"));
//! # Ok::<(), std::io::Error>(())
//! ```

// --- Input re-exports ------------------------------------------------------

pub use termwire_input::{
    Event, FocusEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    TerminalResponse,
};

// --- Output re-exports -----------------------------------------------------

pub use termwire_output::{Color, ColorState, EncoderStats, OutputEncoder, StyleAttrs};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, Event, FocusEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent,
        MouseEventKind, OutputEncoder, StyleAttrs, TerminalResponse,
    };

    pub use crate::{input, output};
}

pub use termwire_input as input;
pub use termwire_output as output;
