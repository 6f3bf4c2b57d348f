#![forbid(unsafe_code)]

//! Terminal output encoding for termwire.
//!
//! This crate turns style- and cursor-aware writes into minimal ANSI byte
//! streams:
//! - [`OutputEncoder`] - stateful buffer that elides redundant sequences and
//!   flushes one coalesced write per frame
//! - [`StyleAttrs`] / [`Color`] / [`ColorState`] - the tracked style state
//! - [`ansi`] - pure sequence builders and mode constants the encoder
//!   composes, usable on their own
//!
//! # Example
//! ```
//! use termwire_output::{Color, OutputEncoder, StyleAttrs};
//!
//! let mut encoder = OutputEncoder::new(Vec::new(), 80);
//! encoder.begin_frame();
//! encoder.move_cursor(0, 0);
//! encoder.set_attributes(StyleAttrs::BOLD);
//! encoder.set_foreground(Color::rgb(200, 120, 40));
//! encoder.write_str("status: ok");
//! encoder.end_frame();
//!
//! // Repeating tracked state emits nothing further.
//! encoder.move_cursor(10, 0);
//! encoder.set_foreground(Color::rgb(200, 120, 40));
//!
//! let bytes = encoder.into_inner()?;
//! assert!(bytes.starts_with(b"\x1b[?2026h\x1b[1;1H"));
//! assert!(bytes.ends_with(b"\x1b[?2026l"));
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod ansi;
pub mod encoder;
pub mod style;

pub use encoder::{EncoderStats, OutputEncoder};
pub use style::{Color, ColorState, StyleAttrs};
