#![forbid(unsafe_code)]

//! Keyboard sequence decoding.
//!
//! A buffer decodes against a fixed pattern set, first match wins:
//! literal specials (CR, LF, TAB, backspace, escape, space, and their
//! ESC-prefixed meta forms), the Ctrl+letter range, printable characters,
//! function/navigation escapes (`ESC (O|N|[|[[) ...`), and Meta+char.
//! Escape matching is greedy: a bare ESC is the Escape key only when no
//! longer pattern fits, with no timing window.
//!
//! Mouse reports share the `ESC [` introducer and must be tried first;
//! see [`crate::mouse`] and the [`crate::decode`] composition.

use crate::event::{KeyCode, KeyEvent, Modifiers};

const ESC: u8 = 0x1b;

/// Decode a whole buffer as one key.
///
/// Returns the best match at the start of the buffer; bytes past the
/// matched pattern are ignored, mirroring the prefix semantics of the
/// escape grammar. Empty, corrupted, or truncated input gives `None`;
/// well-formed escapes with an unknown vendor code decode to
/// [`KeyCode::Undefined`] instead.
pub fn decode(raw: &[u8]) -> Option<KeyEvent> {
    match_at(raw).map(|(_, event)| event)
}

/// Decode every key event in a multi-key read.
///
/// The buffer segments at escape boundaries using the same pattern set as
/// [`decode`]: escapes match greedily at each ESC, an ESC that opens no
/// known pattern is taken as the Escape key on its own, and interstitial
/// bytes decode one character at a time. Unmapped bytes are skipped.
pub fn split(raw: &[u8]) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == ESC {
            match match_at(&raw[i..]) {
                Some((len, event)) => {
                    events.push(event);
                    i += len;
                }
                None => {
                    events.push(KeyEvent::from_wire(
                        KeyCode::Escape,
                        Modifiers::NONE,
                        &raw[i..=i],
                    ));
                    i += 1;
                }
            }
        } else {
            // Plain text run up to the next escape
            let run_end = memchr::memchr(ESC, &raw[i..]).map_or(raw.len(), |at| i + at);
            while i < run_end {
                if let Some((_, event)) = match_at(&raw[i..=i]) {
                    events.push(event);
                }
                i += 1;
            }
        }
    }
    events
}

/// Match one key at the start of `raw`, returning the consumed length.
fn match_at(raw: &[u8]) -> Option<(usize, KeyEvent)> {
    let first = *raw.first()?;
    if first != ESC {
        return match_single(first)
            .map(|(code, mods)| (1, KeyEvent::from_wire(code, mods, &raw[..1])));
    }
    // ESC-prefixed two-byte literals
    match raw.get(1).copied() {
        Some(b' ') => {
            return Some((
                2,
                KeyEvent::from_wire(KeyCode::Char(' '), Modifiers::META, &raw[..2]),
            ));
        }
        Some(0x08 | 0x7f) => {
            return Some((
                2,
                KeyEvent::from_wire(KeyCode::Backspace, Modifiers::META, &raw[..2]),
            ));
        }
        _ => {}
    }
    // ESC-ESC is meta-Escape only when nothing follows; a longer tail is
    // either a meta-prefixed escape or separate keys.
    if raw == [ESC, ESC] {
        return Some((
            2,
            KeyEvent::from_wire(KeyCode::Escape, Modifiers::META, raw),
        ));
    }
    if let Some(hit) = match_escape(raw) {
        return Some(hit);
    }
    // Meta+char: ESC then one alphanumeric. Tried after the escape grammar
    // so the `O`/`N` introducers win when a full sequence follows.
    if let Some(c) = raw.get(1).copied() {
        if c.is_ascii_alphanumeric() {
            let mut mods = Modifiers::META;
            if c.is_ascii_uppercase() {
                mods |= Modifiers::SHIFT;
            }
            let code = KeyCode::Char(c.to_ascii_lowercase() as char);
            return Some((2, KeyEvent::from_wire(code, mods, &raw[..2])));
        }
    }
    if raw.len() == 1 {
        return Some((1, KeyEvent::from_wire(KeyCode::Escape, Modifiers::NONE, raw)));
    }
    None
}

/// Decode one non-ESC byte: literals first, then Ctrl+letter, then
/// printable characters. NUL, 0x1C-0x1F, and high-bit bytes are unmapped.
fn match_single(byte: u8) -> Option<(KeyCode, Modifiers)> {
    let hit = match byte {
        b'\r' => (KeyCode::Enter, Modifiers::NONE),
        b'\n' => (KeyCode::Linefeed, Modifiers::NONE),
        b'\t' => (KeyCode::Tab, Modifiers::NONE),
        0x08 | 0x7f => (KeyCode::Backspace, Modifiers::NONE),
        b' ' => (KeyCode::Char(' '), Modifiers::NONE),
        0x01..=0x1a => (KeyCode::Char((byte + 0x60) as char), Modifiers::CTRL),
        0x21..=0x7e => {
            let c = byte as char;
            let mods = if c.is_ascii_uppercase() {
                Modifiers::SHIFT
            } else {
                Modifiers::NONE
            };
            (KeyCode::Char(c), mods)
        }
        _ => return None,
    };
    Some(hit)
}

/// Function/navigation escape: `ESC (O|N|[|[[)` then either a numeric
/// block terminated by `~ ^ $`, or an optional modifier and one letter.
fn match_escape(raw: &[u8]) -> Option<(usize, KeyEvent)> {
    let mut i = 0;
    while raw.get(i).copied() == Some(ESC) {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    let esc_meta = i > 1;

    let intro = match (raw.get(i).copied(), raw.get(i + 1).copied()) {
        (Some(b'['), Some(b'[')) => {
            i += 2;
            "[["
        }
        (Some(b'['), _) => {
            i += 1;
            "["
        }
        (Some(b'O'), _) => {
            i += 1;
            "O"
        }
        (Some(b'N'), _) => {
            i += 1;
            "N"
        }
        _ => return None,
    };
    let tail = &raw[i..];

    // Numeric block: digits, optional ';'-separated modifier digits, and a
    // '~', '^', or '$' terminator. The vendor code keeps the first
    // parameter verbatim ("[15~"); the modifier stays out of it.
    let num_end = digit_run(tail, 0);
    if num_end > 0 {
        let (mod_digits, term_at) = match tail.get(num_end).copied() {
            Some(b';') => {
                let mod_end = digit_run(tail, num_end + 1);
                if mod_end == num_end + 1 {
                    // ';' with no digits: not a numeric block
                    (None, None)
                } else {
                    (Some(&tail[num_end + 1..mod_end]), Some(mod_end))
                }
            }
            _ => (None, Some(num_end)),
        };
        if let Some(term_at) = term_at {
            if let Some(term @ (b'~' | b'^' | b'$')) = tail.get(term_at).copied() {
                let len = i + term_at + 1;
                let mut code = String::with_capacity(intro.len() + num_end + 1);
                code.push_str(intro);
                code.extend(tail[..num_end].iter().map(|&b| b as char));
                code.push(term as char);
                let modifier = parse_modifier(mod_digits)?;
                return Some((len, escape_event(raw, len, code, modifier, esc_meta)));
            }
        }
    }

    // Letter terminator: optional literal "1;" (the dummy first parameter
    // xterm sends with modified arrows), optional modifier digits, one
    // letter. Covers `[A`, `[1;5A`, and the legacy `[5A` form.
    let q = if tail.starts_with(b"1;") { 2 } else { 0 };
    let mod_end = digit_run(tail, q);
    if let Some(letter) = tail.get(mod_end).copied() {
        if letter.is_ascii_alphabetic() {
            let len = i + mod_end + 1;
            let mut code = String::with_capacity(intro.len() + 1);
            code.push_str(intro);
            code.push(letter as char);
            let mod_digits = (mod_end > q).then(|| &tail[q..mod_end]);
            let modifier = parse_modifier(mod_digits)?;
            return Some((len, escape_event(raw, len, code, modifier, esc_meta)));
        }
    }
    None
}

fn escape_event(raw: &[u8], len: usize, code: String, modifier: u32, esc_meta: bool) -> KeyEvent {
    let mut modifiers = Modifiers::from_xterm(modifier);
    if esc_meta {
        modifiers |= Modifiers::META;
    }
    let (key, implied) = lookup(&code).unwrap_or((KeyCode::Undefined, Modifiers::NONE));
    #[cfg(feature = "tracing")]
    if key == KeyCode::Undefined {
        tracing::trace!(code = %code, "unknown escape code");
    }
    let mut event = KeyEvent::from_wire(key, modifiers | implied, &raw[..len]);
    event.escape = Some(code);
    event
}

/// Vendor code table. Codes outside it decode to `Undefined`.
fn lookup(code: &str) -> Option<(KeyCode, Modifiers)> {
    use KeyCode::*;
    const NONE: Modifiers = Modifiers::NONE;
    const SHIFT: Modifiers = Modifiers::SHIFT;
    const CTRL: Modifiers = Modifiers::CTRL;
    let hit = match code {
        // xterm CSI / SS3 arrows and friends
        "[A" | "OA" => (Up, NONE),
        "[B" | "OB" => (Down, NONE),
        "[C" | "OC" => (Right, NONE),
        "[D" | "OD" => (Left, NONE),
        "[E" | "OE" => (Clear, NONE),
        "[H" | "OH" | "[1~" | "[7~" => (Home, NONE),
        "[F" | "OF" | "[4~" | "[8~" => (End, NONE),
        // navigation block
        "[2~" => (Insert, NONE),
        "[3~" => (Delete, NONE),
        "[5~" | "[[5~" => (PageUp, NONE),
        "[6~" | "[[6~" => (PageDown, NONE),
        // function keys: SS3, xterm/rxvt numeric, Cygwin/libuv double-CSI
        "OP" | "[11~" | "[[A" => (F(1), NONE),
        "OQ" | "[12~" | "[[B" => (F(2), NONE),
        "OR" | "[13~" | "[[C" => (F(3), NONE),
        "OS" | "[14~" | "[[D" => (F(4), NONE),
        "[15~" | "[[E" => (F(5), NONE),
        "[17~" => (F(6), NONE),
        "[18~" => (F(7), NONE),
        "[19~" => (F(8), NONE),
        "[20~" => (F(9), NONE),
        "[21~" => (F(10), NONE),
        "[23~" => (F(11), NONE),
        "[24~" => (F(12), NONE),
        // rxvt shift: lowercase letters and '$' finals
        "[a" => (Up, SHIFT),
        "[b" => (Down, SHIFT),
        "[c" => (Right, SHIFT),
        "[d" => (Left, SHIFT),
        "[e" => (Clear, SHIFT),
        "[2$" => (Insert, SHIFT),
        "[3$" => (Delete, SHIFT),
        "[5$" => (PageUp, SHIFT),
        "[6$" => (PageDown, SHIFT),
        "[7$" => (Home, SHIFT),
        "[8$" => (End, SHIFT),
        // rxvt ctrl: SS3 lowercase and '^' finals
        "Oa" => (Up, CTRL),
        "Ob" => (Down, CTRL),
        "Oc" => (Right, CTRL),
        "Od" => (Left, CTRL),
        "Oe" => (Clear, CTRL),
        "[2^" => (Insert, CTRL),
        "[3^" => (Delete, CTRL),
        "[5^" => (PageUp, CTRL),
        "[6^" => (PageDown, CTRL),
        "[7^" => (Home, CTRL),
        "[8^" => (End, CTRL),
        // back-tab
        "[Z" => (Tab, SHIFT),
        _ => return None,
    };
    Some(hit)
}

fn digit_run(raw: &[u8], start: usize) -> usize {
    let mut end = start;
    while raw.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

/// Absent modifier parameter means 1 (no modifiers held).
fn parse_modifier(digits: Option<&[u8]>) -> Option<u32> {
    match digits {
        None => Some(1),
        Some(d) => std::str::from_utf8(d).ok()?.parse().ok(),
    }
}
