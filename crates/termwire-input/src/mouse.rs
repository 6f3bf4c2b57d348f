#![forbid(unsafe_code)]

//! Mouse and focus report decoding.
//!
//! Three tracking encodings share the `ESC [` introducer: classic X10
//! (`CSI M` plus three offset bytes), SGR 1006 (`CSI < code;col;row M|m`),
//! and URXVT 1015 (`CSI code;col;row M` with the code pre-offset by 32).
//! Focus in/out reports (`CSI I` / `CSI O`) ride the same channel.
//!
//! All three encodings pack the same button report: bits 0-1 select the
//! button, bits 2-4 carry Shift/Meta/Ctrl, bit 5 flags motion, and bit 6
//! moves the low bits into scroll-wheel space. Coordinates normalize to
//! 0-indexed cells regardless of encoding.

use crate::event::{Event, FocusEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};

/// Decode a mouse or focus report. `None` when the buffer is not a
/// complete, well-formed report (such buffers may still be keys).
pub fn decode(raw: &[u8]) -> Option<Event> {
    let body = raw.strip_prefix(b"\x1b[")?;
    match *body.first()? {
        b'M' => decode_x10(&body[1..]),
        b'<' => decode_sgr(&body[1..]),
        b'I' if body.len() == 1 => Some(Event::Focus(FocusEvent { gained: true })),
        b'O' if body.len() == 1 => Some(Event::Focus(FocusEvent { gained: false })),
        b'0'..=b'9' => decode_urxvt(body),
        _ => None,
    }
}

/// X10: exactly three bytes, each offset so the smallest legal value is
/// printable. Coordinates below the floor are corrupt, not clamped.
fn decode_x10(data: &[u8]) -> Option<Event> {
    let [code, col, row]: [u8; 3] = data.try_into().ok()?;
    let code = u32::from(code.checked_sub(32)?);
    let x = u16::from(col.checked_sub(33)?);
    let y = u16::from(row.checked_sub(33)?);
    let (kind, modifiers) = resolve(code, false);
    Some(Event::Mouse(MouseEvent { kind, x, y, modifiers }))
}

/// SGR 1006: `code;col;row` then `M` for press, `m` for release. The only
/// encoding that names the released button.
fn decode_sgr(data: &[u8]) -> Option<Event> {
    let (&final_byte, params) = data.split_last()?;
    let release = match final_byte {
        b'M' => false,
        b'm' => true,
        _ => return None,
    };
    let (code, col, row) = three_fields(params)?;
    let x = to_zero_indexed(col)?;
    let y = to_zero_indexed(row)?;
    let (kind, modifiers) = resolve(code, release);
    Some(Event::Mouse(MouseEvent { kind, x, y, modifiers }))
}

/// URXVT 1015: decimal fields like SGR, but the button code keeps the X10
/// +32 offset and release is reported X10-style through the button bits.
fn decode_urxvt(body: &[u8]) -> Option<Event> {
    let (&final_byte, params) = body.split_last()?;
    let release = match final_byte {
        b'M' => false,
        b'm' => true,
        _ => return None,
    };
    let (code, col, row) = three_fields(params)?;
    let x = to_zero_indexed(col)?;
    let y = to_zero_indexed(row)?;
    let (kind, modifiers) = resolve(code.saturating_sub(32), release);
    Some(Event::Mouse(MouseEvent { kind, x, y, modifiers }))
}

/// Split the button code into an event kind and modifiers.
///
/// `release` is the SGR lowercase-final signal; the X10-family encodings
/// instead report release as button bits 3 with no motion bit, which maps
/// to `Up(MouseButton::None)` because the released button is unknown.
fn resolve(code: u32, release: bool) -> (MouseEventKind, Modifiers) {
    let mut modifiers = Modifiers::NONE;
    if code & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if code & 8 != 0 {
        modifiers |= Modifiers::META;
    }
    if code & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }
    let low = code & 0b11;
    let kind = if code & 64 != 0 {
        match low {
            0 => MouseEventKind::ScrollUp,
            1 => MouseEventKind::ScrollDown,
            2 => MouseEventKind::ScrollLeft,
            _ => MouseEventKind::ScrollRight,
        }
    } else if code & 32 != 0 {
        if low == 3 {
            MouseEventKind::Moved
        } else {
            MouseEventKind::Drag(button(low))
        }
    } else if release {
        MouseEventKind::Up(button(low))
    } else if low == 3 {
        MouseEventKind::Up(MouseButton::None)
    } else {
        MouseEventKind::Down(button(low))
    };
    (kind, modifiers)
}

const fn button(low: u32) -> MouseButton {
    match low {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::None,
    }
}

/// Exactly three strictly-numeric `;`-separated fields.
fn three_fields(params: &[u8]) -> Option<(u32, u32, u32)> {
    let text = std::str::from_utf8(params).ok()?;
    let mut fields = text.split(';');
    let a = parse_field(fields.next()?)?;
    let b = parse_field(fields.next()?)?;
    let c = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    Some((a, b, c))
}

/// Digits only: signs, blanks, and empty fields are corrupt input.
fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Wire coordinates are 1-indexed; 0 (seen from some emulators during
/// resize) clamps rather than rejects. Values past `u16::MAX` reject.
fn to_zero_indexed(wire: u32) -> Option<u16> {
    u16::try_from(wire.saturating_sub(1)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(raw: &[u8]) -> MouseEvent {
        match decode(raw) {
            Some(Event::Mouse(event)) => event,
            other => panic!("expected mouse event for {raw:?}, got {other:?}"),
        }
    }

    fn x10(code: u8, x: u8, y: u8) -> Vec<u8> {
        let mut raw = b"\x1b[M".to_vec();
        raw.extend_from_slice(&[32 + code, 33 + x, 33 + y]);
        raw
    }

    #[test]
    fn x10_press_buttons() {
        let event = mouse(&x10(0, 0, 0));
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((event.x, event.y), (0, 0));

        let event = mouse(&x10(1, 4, 2));
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Middle));
        assert_eq!((event.x, event.y), (4, 2));

        let event = mouse(&x10(2, 0, 0));
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Right));
    }

    #[test]
    fn x10_release_loses_button_identity() {
        let event = mouse(&x10(3, 0, 0));
        assert_eq!(event.kind, MouseEventKind::Up(MouseButton::None));
    }

    #[test]
    fn x10_motion_and_drag() {
        // Motion bit with button bits 3: no button held
        let event = mouse(&x10(32 + 3, 1, 1));
        assert_eq!(event.kind, MouseEventKind::Moved);

        let event = mouse(&x10(32, 1, 1));
        assert_eq!(event.kind, MouseEventKind::Drag(MouseButton::Left));

        let event = mouse(&x10(32 + 2, 1, 1));
        assert_eq!(event.kind, MouseEventKind::Drag(MouseButton::Right));
    }

    #[test]
    fn x10_scroll_wheel() {
        assert_eq!(mouse(&x10(64, 0, 0)).kind, MouseEventKind::ScrollUp);
        assert_eq!(mouse(&x10(65, 0, 0)).kind, MouseEventKind::ScrollDown);
        assert_eq!(mouse(&x10(66, 0, 0)).kind, MouseEventKind::ScrollLeft);
        assert_eq!(mouse(&x10(67, 0, 0)).kind, MouseEventKind::ScrollRight);
    }

    #[test]
    fn x10_modifier_bits() {
        assert_eq!(mouse(&x10(4, 0, 0)).modifiers, Modifiers::SHIFT);
        assert_eq!(mouse(&x10(8, 0, 0)).modifiers, Modifiers::META);
        assert_eq!(mouse(&x10(16, 0, 0)).modifiers, Modifiers::CTRL);
        assert_eq!(
            mouse(&x10(4 + 8 + 16, 0, 0)).modifiers,
            Modifiers::SHIFT | Modifiers::META | Modifiers::CTRL
        );
    }

    #[test]
    fn x10_rejects_bytes_below_floor() {
        // Coordinate byte below the +33 floor
        assert_eq!(decode(b"\x1b[M\x20\x20\x21"), None);
        // Button byte below the +32 floor
        assert_eq!(decode(b"\x1b[M\x1f\x21\x21"), None);
    }

    #[test]
    fn x10_rejects_wrong_length() {
        assert_eq!(decode(b"\x1b[M"), None);
        assert_eq!(decode(b"\x1b[M\x20\x21"), None);
        assert_eq!(decode(b"\x1b[M\x20\x21\x21\x21"), None);
    }

    #[test]
    fn sgr_press_at_origin() {
        let event = mouse(b"\x1b[<0;1;1M");
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((event.x, event.y), (0, 0));
    }

    #[test]
    fn sgr_release_names_the_button() {
        let event = mouse(b"\x1b[<0;5;3m");
        assert_eq!(event.kind, MouseEventKind::Up(MouseButton::Left));
        assert_eq!((event.x, event.y), (4, 2));

        let event = mouse(b"\x1b[<2;1;1m");
        assert_eq!(event.kind, MouseEventKind::Up(MouseButton::Right));
    }

    #[test]
    fn sgr_drag_and_scroll() {
        let event = mouse(b"\x1b[<32;10;20M");
        assert_eq!(event.kind, MouseEventKind::Drag(MouseButton::Left));
        assert_eq!((event.x, event.y), (9, 19));

        assert_eq!(mouse(b"\x1b[<64;1;1M").kind, MouseEventKind::ScrollUp);
        assert_eq!(mouse(b"\x1b[<65;1;1M").kind, MouseEventKind::ScrollDown);
    }

    #[test]
    fn sgr_modifier_bits() {
        assert_eq!(mouse(b"\x1b[<4;1;1M").modifiers, Modifiers::SHIFT);
        assert_eq!(mouse(b"\x1b[<16;1;1M").modifiers, Modifiers::CTRL);
        assert_eq!(
            mouse(b"\x1b[<28;1;1M").modifiers,
            Modifiers::SHIFT | Modifiers::META | Modifiers::CTRL
        );
    }

    #[test]
    fn sgr_zero_coordinate_clamps() {
        let event = mouse(b"\x1b[<0;0;1M");
        assert_eq!((event.x, event.y), (0, 0));
    }

    #[test]
    fn sgr_leading_zeros_decode_identically() {
        let event = mouse(b"\x1b[<0;0010;0020M");
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((event.x, event.y), (9, 19));
        assert_eq!(decode(b"\x1b[<0;0010;0020M"), decode(b"\x1b[<0;10;20M"));
    }

    #[test]
    fn sgr_rejects_malformed_fields() {
        // Field count
        assert_eq!(decode(b"\x1b[<0;1M"), None);
        assert_eq!(decode(b"\x1b[<0;1;1;1M"), None);
        // Field contents
        assert_eq!(decode(b"\x1b[<a;1;1M"), None);
        assert_eq!(decode(b"\x1b[<0;-1;1M"), None);
        assert_eq!(decode(b"\x1b[<0;;1M"), None);
        assert_eq!(decode(b"\x1b[<0; 1;1M"), None);
        // Coordinate past u16
        assert_eq!(decode(b"\x1b[<0;70000;1M"), None);
        // Final byte
        assert_eq!(decode(b"\x1b[<0;1;1"), None);
    }

    #[test]
    fn urxvt_keeps_the_x10_offset() {
        let event = mouse(b"\x1b[32;1;1M");
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((event.x, event.y), (0, 0));

        let event = mouse(b"\x1b[33;8;4M");
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Middle));
        assert_eq!((event.x, event.y), (7, 3));

        // Button bits 3: release without button identity
        let event = mouse(b"\x1b[35;1;1M");
        assert_eq!(event.kind, MouseEventKind::Up(MouseButton::None));

        // 96 + 32: wheel up
        assert_eq!(mouse(b"\x1b[128;1;1M").kind, MouseEventKind::ScrollUp);
    }

    #[test]
    fn focus_reports() {
        assert_eq!(
            decode(b"\x1b[I"),
            Some(Event::Focus(FocusEvent { gained: true }))
        );
        assert_eq!(
            decode(b"\x1b[O"),
            Some(Event::Focus(FocusEvent { gained: false }))
        );
        // Exact match only
        assert_eq!(decode(b"\x1b[I;"), None);
    }

    #[test]
    fn non_mouse_input_is_none() {
        assert_eq!(decode(b""), None);
        assert_eq!(decode(b"abc"), None);
        assert_eq!(decode(b"\x1b[A"), None);
        assert_eq!(decode(b"\x1b[1;5A"), None);
        assert_eq!(decode(b"\x1b[15~"), None);
        assert_eq!(decode(b"\x1b]0;title\x07"), None);
    }
}
