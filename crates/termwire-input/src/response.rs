#![forbid(unsafe_code)]

//! Terminal query-reply decoding.
//!
//! Replies to the queries in [`crate::query`] arrive on stdin interleaved
//! with keys. Each reply decodes into a [`TerminalResponse`] naming the
//! report and its fields; anything outside the reply grammar comes back as
//! [`TerminalResponse::Unknown`] with the raw text preserved, so a caller
//! can route unmatched replies to its own handling.
//!
//! Reports keep the units the terminal sent. Cursor positions are
//! 1-indexed here, unlike the 0-indexed mouse coordinates: a cursor report
//! answers "what does the terminal think", not "where in my buffer".

/// One decoded terminal reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalResponse {
    /// DA1 (`CSI ? ps c`): device attributes, parameters verbatim.
    PrimaryAttributes {
        /// Capability parameters as sent, first is the class.
        params: Vec<u32>,
    },
    /// DA2 (`CSI > type;version[;cartridge] c`); the cartridge field is
    /// always 0 in practice and is dropped.
    SecondaryAttributes {
        /// Terminal identity code (0 = VT100-class, 1 = VT220, ...).
        terminal_type: u32,
        /// Firmware version.
        version: u32,
    },
    /// CPR (`CSI row;col R`), both fields 1-indexed.
    CursorPosition { row: u16, col: u16 },
    /// DSR (`CSI code n`); 0 means ready, 3 a malfunction.
    DeviceStatus { code: u32 },
    /// Window state report (`CSI 1 t` open, `CSI 2 t` iconified).
    WindowState { open: bool },
    /// Window position report (`CSI 3;x;y t`), pixels.
    WindowPosition { x: u32, y: u32 },
    /// Window size report (`CSI 4;height;width t`), pixels.
    WindowSizePixels { height: u32, width: u32 },
    /// Character cell size report (`CSI 6;height;width t`), pixels.
    CellSize { height: u32, width: u32 },
    /// Text area size report (`CSI 8;rows;columns t`), cells.
    TextAreaSize { rows: u32, columns: u32 },
    /// Screen size report (`CSI 9;rows;columns t`), cells.
    ScreenSize { rows: u32, columns: u32 },
    /// Title report (`OSC l title ST`, or the numeric `OSC 108;title ST`).
    WindowTitle { text: String },
    /// Icon label report (`OSC L label ST`, or `OSC 76;label ST`).
    IconLabel { text: String },
    /// DECRQLP reply (`CSI event;buttons;row;col;page &w`). Omitted
    /// trailing fields read as 0; event 0 means the locator is idle.
    LocatorPosition {
        event: u32,
        buttons: u32,
        row: u32,
        col: u32,
        page: u32,
    },
    /// Anything outside the reply grammar.
    Unknown { raw: String },
}

/// Decode one complete reply. Total: unmatched input becomes `Unknown`.
pub fn decode(reply: &str) -> TerminalResponse {
    parse(reply).unwrap_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::trace!(reply = %reply.escape_debug(), "unknown terminal reply");
        TerminalResponse::Unknown {
            raw: reply.to_owned(),
        }
    })
}

fn parse(reply: &str) -> Option<TerminalResponse> {
    if let Some(body) = reply.strip_prefix("\x1b[") {
        return parse_csi(body);
    }
    if let Some(body) = reply.strip_prefix("\x1b]") {
        return parse_osc(body);
    }
    None
}

fn parse_csi(body: &str) -> Option<TerminalResponse> {
    if let Some(params) = body.strip_prefix('?') {
        let params = numeric_fields(params.strip_suffix('c')?)?;
        return Some(TerminalResponse::PrimaryAttributes { params });
    }
    if let Some(params) = body.strip_prefix('>') {
        let fields = numeric_fields(params.strip_suffix('c')?)?;
        return match fields[..] {
            [terminal_type, version] | [terminal_type, version, _] => {
                Some(TerminalResponse::SecondaryAttributes {
                    terminal_type,
                    version,
                })
            }
            _ => None,
        };
    }
    if let Some(params) = body.strip_suffix("&w") {
        let fields = lenient_fields(params)?;
        if fields.len() > 5 {
            return None;
        }
        let get = |i: usize| fields.get(i).copied().unwrap_or(0);
        return Some(TerminalResponse::LocatorPosition {
            event: get(0),
            buttons: get(1),
            row: get(2),
            col: get(3),
            page: get(4),
        });
    }
    if let Some(params) = body.strip_suffix('R') {
        let fields = numeric_fields(params)?;
        let [row, col] = fields[..] else { return None };
        return Some(TerminalResponse::CursorPosition {
            row: u16::try_from(row).ok()?,
            col: u16::try_from(col).ok()?,
        });
    }
    if let Some(params) = body.strip_suffix('n') {
        let fields = numeric_fields(params)?;
        let [code] = fields[..] else { return None };
        return Some(TerminalResponse::DeviceStatus { code });
    }
    if let Some(params) = body.strip_suffix('t') {
        return parse_window_report(params);
    }
    None
}

/// `CSI code[;p1[;p2]] t` family. Omitted payload fields read as 0; the
/// state codes take no payload at all.
fn parse_window_report(params: &str) -> Option<TerminalResponse> {
    let fields = numeric_fields(params)?;
    let code = *fields.first()?;
    let rest = &fields[1..];
    let pair = match *rest {
        [] => (0, 0),
        [a] => (a, 0),
        [a, b] => (a, b),
        _ => return None,
    };
    let report = match code {
        1 | 2 => {
            if !rest.is_empty() {
                return None;
            }
            TerminalResponse::WindowState { open: code == 1 }
        }
        3 => TerminalResponse::WindowPosition {
            x: pair.0,
            y: pair.1,
        },
        4 => TerminalResponse::WindowSizePixels {
            height: pair.0,
            width: pair.1,
        },
        6 => TerminalResponse::CellSize {
            height: pair.0,
            width: pair.1,
        },
        8 => TerminalResponse::TextAreaSize {
            rows: pair.0,
            columns: pair.1,
        },
        9 => TerminalResponse::ScreenSize {
            rows: pair.0,
            columns: pair.1,
        },
        _ => return None,
    };
    Some(report)
}

/// OSC title and icon-label reports, BEL- or ST-terminated. A trailing
/// bare ESC (an ST split by the reader) also strips.
fn parse_osc(body: &str) -> Option<TerminalResponse> {
    let body = body
        .strip_suffix('\x07')
        .or_else(|| body.strip_suffix("\x1b\\"))
        .or_else(|| body.strip_suffix('\x1b'))
        .unwrap_or(body);
    if let Some(text) = body.strip_prefix('l') {
        return Some(TerminalResponse::WindowTitle {
            text: text.to_owned(),
        });
    }
    if let Some(text) = body.strip_prefix('L') {
        return Some(TerminalResponse::IconLabel {
            text: text.to_owned(),
        });
    }
    let (code, text) = body.split_once(';')?;
    let report = match parse_number(code)? {
        108 => TerminalResponse::WindowTitle {
            text: text.to_owned(),
        },
        76 => TerminalResponse::IconLabel {
            text: text.to_owned(),
        },
        _ => return None,
    };
    Some(report)
}

/// At least one field, every field strictly numeric.
fn numeric_fields(params: &str) -> Option<Vec<u32>> {
    if params.is_empty() {
        return None;
    }
    params.split(';').map(parse_number).collect()
}

/// Like [`numeric_fields`] but empty fields (and an empty list) read as
/// omitted, for the locator reply's optional tail.
fn lenient_fields(params: &str) -> Option<Vec<u32>> {
    if params.is_empty() {
        return Some(Vec::new());
    }
    params
        .split(';')
        .map(|field| {
            if field.is_empty() {
                Some(0)
            } else {
                parse_number(field)
            }
        })
        .collect()
}

fn parse_number(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_attributes_keep_all_params() {
        assert_eq!(
            decode("\x1b[?1;2c"),
            TerminalResponse::PrimaryAttributes { params: vec![1, 2] }
        );
        assert_eq!(
            decode("\x1b[?62;1;6;9c"),
            TerminalResponse::PrimaryAttributes {
                params: vec![62, 1, 6, 9]
            }
        );
    }

    #[test]
    fn primary_attributes_require_params() {
        assert!(matches!(
            decode("\x1b[?c"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn secondary_attributes() {
        assert_eq!(
            decode("\x1b[>0;276;0c"),
            TerminalResponse::SecondaryAttributes {
                terminal_type: 0,
                version: 276
            }
        );
        // Two-field form without the cartridge
        assert_eq!(
            decode("\x1b[>1;5202c"),
            TerminalResponse::SecondaryAttributes {
                terminal_type: 1,
                version: 5202
            }
        );
        assert!(matches!(
            decode("\x1b[>1c"),
            TerminalResponse::Unknown { .. }
        ));
        assert!(matches!(
            decode("\x1b[>1;2;3;4c"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn cursor_position_is_one_indexed() {
        assert_eq!(
            decode("\x1b[10;20R"),
            TerminalResponse::CursorPosition { row: 10, col: 20 }
        );
        assert_eq!(
            decode("\x1b[1;1R"),
            TerminalResponse::CursorPosition { row: 1, col: 1 }
        );
    }

    #[test]
    fn leading_zeros_decode_identically() {
        assert_eq!(decode("\x1b[010;020R"), decode("\x1b[10;20R"));
    }

    #[test]
    fn cursor_position_rejects_bad_shapes() {
        assert!(matches!(decode("\x1b[10R"), TerminalResponse::Unknown { .. }));
        assert!(matches!(
            decode("\x1b[1;2;3R"),
            TerminalResponse::Unknown { .. }
        ));
        assert!(matches!(
            decode("\x1b[99999999999;1R"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn device_status() {
        assert_eq!(decode("\x1b[0n"), TerminalResponse::DeviceStatus { code: 0 });
        assert_eq!(decode("\x1b[3n"), TerminalResponse::DeviceStatus { code: 3 });
    }

    #[test]
    fn window_state() {
        assert_eq!(decode("\x1b[1t"), TerminalResponse::WindowState { open: true });
        assert_eq!(
            decode("\x1b[2t"),
            TerminalResponse::WindowState { open: false }
        );
        // State reports carry no payload
        assert!(matches!(
            decode("\x1b[1;9t"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn window_geometry_reports() {
        assert_eq!(
            decode("\x1b[3;100;200t"),
            TerminalResponse::WindowPosition { x: 100, y: 200 }
        );
        assert_eq!(
            decode("\x1b[4;600;800t"),
            TerminalResponse::WindowSizePixels {
                height: 600,
                width: 800
            }
        );
        assert_eq!(
            decode("\x1b[6;16;8t"),
            TerminalResponse::CellSize {
                height: 16,
                width: 8
            }
        );
        assert_eq!(
            decode("\x1b[8;24;80t"),
            TerminalResponse::TextAreaSize {
                rows: 24,
                columns: 80
            }
        );
        assert_eq!(
            decode("\x1b[9;30;100t"),
            TerminalResponse::ScreenSize {
                rows: 30,
                columns: 100
            }
        );
    }

    #[test]
    fn window_reports_fill_omitted_fields_with_zero() {
        assert_eq!(
            decode("\x1b[4;600t"),
            TerminalResponse::WindowSizePixels {
                height: 600,
                width: 0
            }
        );
        assert_eq!(
            decode("\x1b[8t"),
            TerminalResponse::TextAreaSize {
                rows: 0,
                columns: 0
            }
        );
    }

    #[test]
    fn window_reports_reject_unknown_and_overlong() {
        assert!(matches!(decode("\x1b[5t"), TerminalResponse::Unknown { .. }));
        assert!(matches!(
            decode("\x1b[3;1;2;3t"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn title_and_icon_label() {
        assert_eq!(
            decode("\x1b]lmy title\x07"),
            TerminalResponse::WindowTitle {
                text: "my title".into()
            }
        );
        assert_eq!(
            decode("\x1b]Licon\x1b\\"),
            TerminalResponse::IconLabel {
                text: "icon".into()
            }
        );
        // Numeric forms
        assert_eq!(
            decode("\x1b]108;my title\x07"),
            TerminalResponse::WindowTitle {
                text: "my title".into()
            }
        );
        assert_eq!(
            decode("\x1b]76;icon\x07"),
            TerminalResponse::IconLabel {
                text: "icon".into()
            }
        );
    }

    #[test]
    fn title_tolerates_missing_terminator() {
        assert_eq!(
            decode("\x1b]lfoo"),
            TerminalResponse::WindowTitle { text: "foo".into() }
        );
        // ST split by the reader leaves a bare ESC
        assert_eq!(
            decode("\x1b]lfoo\x1b"),
            TerminalResponse::WindowTitle { text: "foo".into() }
        );
    }

    #[test]
    fn locator_position() {
        assert_eq!(
            decode("\x1b[2;4;10;20;1&w"),
            TerminalResponse::LocatorPosition {
                event: 2,
                buttons: 4,
                row: 10,
                col: 20,
                page: 1
            }
        );
        // Omitted tail reads as zero
        assert_eq!(
            decode("\x1b[0&w"),
            TerminalResponse::LocatorPosition {
                event: 0,
                buttons: 0,
                row: 0,
                col: 0,
                page: 0
            }
        );
        assert_eq!(
            decode("\x1b[&w"),
            TerminalResponse::LocatorPosition {
                event: 0,
                buttons: 0,
                row: 0,
                col: 0,
                page: 0
            }
        );
        assert!(matches!(
            decode("\x1b[1;2;3;4;5;6&w"),
            TerminalResponse::Unknown { .. }
        ));
    }

    #[test]
    fn unknown_preserves_raw_text() {
        assert_eq!(
            decode("hello"),
            TerminalResponse::Unknown {
                raw: "hello".into()
            }
        );
        assert_eq!(
            decode("\x1b[Z"),
            TerminalResponse::Unknown {
                raw: "\x1b[Z".into()
            }
        );
        assert_eq!(decode(""), TerminalResponse::Unknown { raw: String::new() });
    }
}
