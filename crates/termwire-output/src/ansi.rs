#![forbid(unsafe_code)]

//! ANSI escape sequence generation.
//!
//! Pure byte builders for the control sequences the encoder emits. Every
//! function appends to a caller-owned buffer and cannot fail; state
//! tracking and move-form selection live in [`crate::encoder`], not here.
//!
//! # Sequence Reference
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ n m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ n A/B/C/D` | Relative cursor moves |
//! | CSI | `ESC [ ? 2026 h/l` | Synchronized Update (DEC) |
//! | CSI | `ESC [ ? mode h/l` | Private mode set/reset |

use crate::style::{Color, StyleAttrs};

// =============================================================================
// SGR (Select Graphic Rendition)
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Ordered table of (flag, enable code), in SGR code order.
pub const ATTR_TABLE: [(StyleAttrs, u8); 8] = [
    (StyleAttrs::BOLD, 1),
    (StyleAttrs::DIM, 2),
    (StyleAttrs::ITALIC, 3),
    (StyleAttrs::UNDERLINE, 4),
    (StyleAttrs::BLINK, 5),
    (StyleAttrs::REVERSE, 7),
    (StyleAttrs::HIDDEN, 8),
    (StyleAttrs::STRIKETHROUGH, 9),
];

/// Append one SGR sequence enabling every flag in `attrs`.
///
/// Emits `CSI n ; n ; ... m` with the codes joined; nothing for the empty
/// set. There are no disable codes here: the encoder handles attribute
/// removal with a full reset and reapply.
pub fn sgr_attrs(buf: &mut Vec<u8>, attrs: StyleAttrs) {
    if attrs.is_empty() {
        return;
    }
    buf.extend_from_slice(b"\x1b[");
    let mut first = true;
    for (flag, code) in ATTR_TABLE {
        if attrs.contains(flag) {
            if !first {
                buf.push(b';');
            }
            push_dec(buf, code.into());
            first = false;
        }
    }
    buf.push(b'm');
}

/// Append the foreground SGR for `color`: `CSI 39 m` for the default,
/// `CSI 38;2;r;g;b m` for direct color.
pub fn sgr_fg(buf: &mut Vec<u8>, color: Color) {
    match color {
        Color::Default => buf.extend_from_slice(b"\x1b[39m"),
        Color::Rgb { r, g, b } => sgr_rgb(buf, b"\x1b[38;2;", r, g, b),
    }
}

/// Append the background SGR for `color`: `CSI 49 m` for the default,
/// `CSI 48;2;r;g;b m` for direct color.
pub fn sgr_bg(buf: &mut Vec<u8>, color: Color) {
    match color {
        Color::Default => buf.extend_from_slice(b"\x1b[49m"),
        Color::Rgb { r, g, b } => sgr_rgb(buf, b"\x1b[48;2;", r, g, b),
    }
}

fn sgr_rgb(buf: &mut Vec<u8>, prefix: &[u8], r: u8, g: u8, b: u8) {
    buf.extend_from_slice(prefix);
    push_dec(buf, r.into());
    buf.push(b';');
    push_dec(buf, g.into());
    buf.push(b';');
    push_dec(buf, b.into());
    buf.push(b'm');
}

// =============================================================================
// Cursor Positioning
// =============================================================================

/// CUP (Cursor Position): `CSI row ; col H`
///
/// Row and col are 0-indexed input, converted to 1-indexed for the wire.
pub fn cup(buf: &mut Vec<u8>, row: u16, col: u16) {
    buf.extend_from_slice(b"\x1b[");
    push_dec(buf, row.saturating_add(1));
    buf.push(b';');
    push_dec(buf, col.saturating_add(1));
    buf.push(b'H');
}

/// Move cursor up: `CSI n A`
pub fn cuu(buf: &mut Vec<u8>, n: u16) {
    relative_move(buf, n, b'A');
}

/// Move cursor down: `CSI n B`
pub fn cud(buf: &mut Vec<u8>, n: u16) {
    relative_move(buf, n, b'B');
}

/// Move cursor forward (right): `CSI n C`
pub fn cuf(buf: &mut Vec<u8>, n: u16) {
    relative_move(buf, n, b'C');
}

/// Move cursor back (left): `CSI n D`
pub fn cub(buf: &mut Vec<u8>, n: u16) {
    relative_move(buf, n, b'D');
}

/// `n == 0` appends nothing; `n == 1` uses the parameterless short form.
fn relative_move(buf: &mut Vec<u8>, n: u16, terminator: u8) {
    if n == 0 {
        return;
    }
    buf.extend_from_slice(b"\x1b[");
    if n > 1 {
        push_dec(buf, n);
    }
    buf.push(terminator);
}

/// CR+LF pair: column 0 of the next row.
///
/// In raw mode (OPOST disabled) a bare LF keeps the column, so the pair is
/// the portable two-byte form of that move.
pub fn crlf(buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"\r\n");
}

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

// =============================================================================
// Synchronized Update (DEC 2026)
// =============================================================================

/// Begin synchronized update: `CSI ? 2026 h`
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";

/// End synchronized update: `CSI ? 2026 l`
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

// =============================================================================
// Mode Control
// =============================================================================

/// Enable alternate screen: `CSI ? 1049 h`
pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";

/// Disable alternate screen: `CSI ? 1049 l`
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";

/// Enable bracketed paste: `CSI ? 2004 h`
pub const BRACKETED_PASTE_ENABLE: &[u8] = b"\x1b[?2004h";

/// Disable bracketed paste: `CSI ? 2004 l`
pub const BRACKETED_PASTE_DISABLE: &[u8] = b"\x1b[?2004l";

/// Enable SGR mouse reporting: `CSI ? 1000;1002;1006 h`
///
/// Enables:
/// - 1000: Normal mouse tracking
/// - 1002: Button event tracking (motion while pressed)
/// - 1006: SGR extended coordinates (supports > 223)
pub const MOUSE_ENABLE: &[u8] = b"\x1b[?1000;1002;1006h";

/// Disable mouse reporting: `CSI ? 1000;1002;1006 l`
pub const MOUSE_DISABLE: &[u8] = b"\x1b[?1000;1002;1006l";

/// Enable focus reporting: `CSI ? 1004 h`
pub const FOCUS_ENABLE: &[u8] = b"\x1b[?1004h";

/// Disable focus reporting: `CSI ? 1004 l`
pub const FOCUS_DISABLE: &[u8] = b"\x1b[?1004l";

/// Append a decimal without going through the formatting machinery.
#[inline]
fn push_dec(buf: &mut Vec<u8>, n: u16) {
    let mut digits = [0u8; 5];
    let mut i = digits.len();
    let mut n = n;
    loop {
        i -= 1;
        digits[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    buf.extend_from_slice(&digits[i..]);
}

// =============================================================================
// Tests
// =============================================================================
