#![forbid(unsafe_code)]

//! Style state tracked by the encoder.

bitflags::bitflags! {
    /// 8-bit text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleAttrs: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text.
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
        /// Hidden / invisible text.
        const HIDDEN        = 0b1000_0000;
    }
}

/// Terminal color.
///
/// `Default` is whatever the emulator's palette supplies (SGR 39/49), so a
/// run styled with it follows the user's theme. Everything else is 24-bit
/// direct color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's configured default foreground or background.
    #[default]
    Default,
    /// 24-bit direct color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
}

impl Color {
    /// Direct-color constructor.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }
}

/// The graphic-rendition state an encoder carries between writes: both
/// colors plus the active attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorState {
    /// Current foreground.
    pub fg: Color,
    /// Current background.
    pub bg: Color,
    /// Active attribute flags.
    pub attrs: StyleAttrs,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            attrs: StyleAttrs::empty(),
        }
    }
}
