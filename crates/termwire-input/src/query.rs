#![forbid(unsafe_code)]

//! Query sequences whose replies [`crate::response`] decodes.
//!
//! Each function returns the exact bytes to write to the terminal. Replies
//! arrive on stdin and must be picked out of the key stream by the caller;
//! the pairing is by reply shape, not by order, so interleaved keys do not
//! desynchronize anything.

/// DA1 (`CSI c`): ask for primary device attributes.
pub const fn primary_attributes() -> &'static [u8] {
    b"\x1b[c"
}

/// DA2 (`CSI > c`): ask for terminal type and firmware version.
pub const fn secondary_attributes() -> &'static [u8] {
    b"\x1b[>c"
}

/// DSR 6 (`CSI 6 n`): ask for the cursor position.
pub const fn cursor_position() -> &'static [u8] {
    b"\x1b[6n"
}

/// DSR 5 (`CSI 5 n`): ask for operating status.
pub const fn device_status() -> &'static [u8] {
    b"\x1b[5n"
}

/// `CSI 11 t`: ask whether the window is open or iconified.
pub const fn window_state() -> &'static [u8] {
    b"\x1b[11t"
}

/// `CSI 13 t`: ask for the window position in pixels.
pub const fn window_position() -> &'static [u8] {
    b"\x1b[13t"
}

/// `CSI 14 t`: ask for the window size in pixels.
pub const fn window_size_pixels() -> &'static [u8] {
    b"\x1b[14t"
}

/// `CSI 16 t`: ask for the character cell size in pixels.
pub const fn cell_size() -> &'static [u8] {
    b"\x1b[16t"
}

/// `CSI 18 t`: ask for the text area size in cells.
pub const fn text_area_size() -> &'static [u8] {
    b"\x1b[18t"
}

/// `CSI 19 t`: ask for the full screen size in cells.
pub const fn screen_size() -> &'static [u8] {
    b"\x1b[19t"
}

/// `CSI 20 t`: ask for the icon label.
pub const fn icon_label() -> &'static [u8] {
    b"\x1b[20t"
}

/// `CSI 21 t`: ask for the window title.
pub const fn window_title() -> &'static [u8] {
    b"\x1b[21t"
}

/// DECRQLP (`CSI ' |`): ask for one locator position report.
pub const fn locator_position() -> &'static [u8] {
    b"\x1b['|"
}
