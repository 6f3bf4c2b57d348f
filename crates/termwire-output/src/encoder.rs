#![forbid(unsafe_code)]

//! Stateful output encoding with redundant-sequence elision.
//!
//! [`OutputEncoder`] accumulates style- and cursor-aware writes as pending
//! chunks and flushes them as one coalesced stream write. It tracks what the
//! terminal last saw (cursor position, colors, attribute mask) and skips any
//! operation that would repeat the tracked state, so a render loop can call
//! `move_cursor`/`set_foreground`/`write_str` unconditionally and still emit
//! near-minimal bytes.
//!
//! Tracking assumes this encoder is the only writer to the target. Raw
//! writes and resizes invalidate the tracked cursor; the next move falls
//! back to an absolute position.

use std::io::{self, Write};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ansi;
use crate::style::{Color, ColorState, StyleAttrs};

/// Counters for one encoder's lifetime. Enabled via
/// [`OutputEncoder::with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// Chunks appended to the pending buffer.
    pub chunks: u64,
    /// Total bytes handed to the writer across all flushes.
    pub bytes_flushed: u64,
    /// Successful flush calls.
    pub flushes: u64,
    /// Operations skipped because tracked state already matched.
    pub elided: u64,
}

/// Buffered terminal output with state-diffed emission.
///
/// All mutating operations are infallible appends; only [`flush`] and
/// [`into_inner`] touch the underlying writer and can fail. A failed flush
/// keeps the pending chunks so the caller can retry.
///
/// [`flush`]: OutputEncoder::flush
/// [`into_inner`]: OutputEncoder::into_inner
#[derive(Debug)]
pub struct OutputEncoder<W: Write> {
    writer: W,
    width: u16,
    chunks: Vec<Vec<u8>>,
    /// Tracked (x, y); `None` until the first absolute move lands.
    cursor: Option<(u16, u16)>,
    colors: ColorState,
    sync_depth: u32,
    stats: Option<EncoderStats>,
}

impl<W: Write> OutputEncoder<W> {
    /// Create an encoder targeting `writer`, tracking wrap at `width` cells.
    pub fn new(writer: W, width: u16) -> Self {
        Self {
            writer,
            width,
            chunks: Vec::new(),
            cursor: None,
            colors: ColorState::default(),
            sync_depth: 0,
            stats: None,
        }
    }

    /// Like [`new`](Self::new), with [`EncoderStats`] collection enabled.
    pub fn with_stats(writer: W, width: u16) -> Self {
        let mut encoder = Self::new(writer, width);
        encoder.stats = Some(EncoderStats::default());
        encoder
    }

    /// Tracked cursor position, if known.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Tracked color and attribute state.
    pub fn colors(&self) -> ColorState {
        self.colors
    }

    /// Screen width used for wrap tracking.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total bytes currently pending flush.
    pub fn pending_len(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    /// Collected counters, `None` unless built with
    /// [`with_stats`](Self::with_stats).
    pub fn stats(&self) -> Option<&EncoderStats> {
        self.stats.as_ref()
    }

    /// Update the tracked screen width. The cursor position becomes unknown
    /// since the terminal may have reflowed.
    pub fn resize(&mut self, width: u16) {
        self.width = width;
        self.cursor = None;
    }

    /// Move the cursor to 0-indexed `(x, y)`.
    ///
    /// Emits nothing when the tracked position already matches. Otherwise
    /// picks the cheapest form: a one-step relative move, CR LF for column 0
    /// of the next row, or an absolute CUP. Any move with an unknown cursor
    /// goes absolute; every move leaves the cursor known.
    pub fn move_cursor(&mut self, x: u16, y: u16) {
        if self.cursor == Some((x, y)) {
            self.note_elided();
            return;
        }
        let mut chunk = Vec::new();
        match self.cursor {
            Some((cx, cy)) if cy == y && cx.checked_add(1) == Some(x) => {
                ansi::cuf(&mut chunk, 1);
            }
            Some((cx, cy)) if cy == y && x.checked_add(1) == Some(cx) => {
                ansi::cub(&mut chunk, 1);
            }
            Some((_, cy)) if x == 0 && cy.checked_add(1) == Some(y) => {
                ansi::crlf(&mut chunk);
            }
            Some((cx, cy)) if cx == x && cy.checked_add(1) == Some(y) => {
                ansi::cud(&mut chunk, 1);
            }
            Some((cx, cy)) if cx == x && y.checked_add(1) == Some(cy) => {
                ansi::cuu(&mut chunk, 1);
            }
            _ => ansi::cup(&mut chunk, y, x),
        }
        self.cursor = Some((x, y));
        self.push_chunk(chunk);
    }

    /// Set the foreground color, eliding when it already matches.
    pub fn set_foreground(&mut self, color: Color) {
        if self.colors.fg == color {
            self.note_elided();
            return;
        }
        let mut chunk = Vec::new();
        ansi::sgr_fg(&mut chunk, color);
        self.colors.fg = color;
        self.push_chunk(chunk);
    }

    /// Set the background color, eliding when it already matches.
    pub fn set_background(&mut self, color: Color) {
        if self.colors.bg == color {
            self.note_elided();
            return;
        }
        let mut chunk = Vec::new();
        ansi::sgr_bg(&mut chunk, color);
        self.colors.bg = color;
        self.push_chunk(chunk);
    }

    /// Set the attribute mask to exactly `attrs`.
    ///
    /// Adding flags emits one joined SGR with the new on-codes. SGR has no
    /// per-flag off-codes, so removing any flag emits a full reset followed
    /// by the whole new mask. The reset also clears colors on the terminal,
    /// so non-default tracked colors are re-asserted afterwards.
    pub fn set_attributes(&mut self, attrs: StyleAttrs) {
        if attrs == self.colors.attrs {
            self.note_elided();
            return;
        }
        let removed = self.colors.attrs & !attrs;
        if removed.is_empty() {
            let added = attrs & !self.colors.attrs;
            let mut chunk = Vec::new();
            ansi::sgr_attrs(&mut chunk, added);
            self.colors.attrs = attrs;
            self.push_chunk(chunk);
            return;
        }
        let fg = self.colors.fg;
        let bg = self.colors.bg;
        let mut chunk = Vec::new();
        chunk.extend_from_slice(ansi::SGR_RESET);
        ansi::sgr_attrs(&mut chunk, attrs);
        self.colors = ColorState {
            fg: Color::Default,
            bg: Color::Default,
            attrs,
        };
        self.push_chunk(chunk);
        if fg != Color::Default {
            self.set_foreground(fg);
        }
        if bg != Color::Default {
            self.set_background(bg);
        }
    }

    /// Write one printable character and advance the tracked column by its
    /// display width.
    ///
    /// Control characters would desynchronize cursor tracking and are a
    /// caller bug; use [`write_raw`](Self::write_raw) for escape sequences.
    pub fn write_char(&mut self, c: char) {
        debug_assert!(!c.is_control(), "control character {c:?} in write_char");
        let mut dst = [0u8; 4];
        self.push_chunk(c.encode_utf8(&mut dst).as_bytes().to_vec());
        let cells = UnicodeWidthChar::width(c).unwrap_or(0);
        self.advance(cells as u16);
    }

    /// Write a string of printable text, advancing the tracked column by its
    /// display width measured per grapheme cluster.
    pub fn write_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        debug_assert!(
            !text.chars().any(char::is_control),
            "control character in write_str"
        );
        self.push_chunk(text.as_bytes().to_vec());
        let cells: usize = text.graphemes(true).map(|g| g.width()).sum();
        self.advance(u16::try_from(cells).unwrap_or(u16::MAX));
    }

    /// Append bytes verbatim. The bytes are not inspected, so the tracked
    /// cursor becomes unknown; color tracking is left to the caller's care.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.push_chunk(bytes.to_vec());
        self.cursor = None;
    }

    /// Open a synchronized-update frame. Only the outermost call emits the
    /// begin marker; nested calls just deepen the counter.
    pub fn begin_frame(&mut self) {
        if self.sync_depth == 0 {
            self.push_chunk(ansi::SYNC_BEGIN.to_vec());
        }
        self.sync_depth = self.sync_depth.saturating_add(1);
    }

    /// Close a synchronized-update frame. Emits the end marker only when the
    /// outermost frame closes; a call with no open frame is a no-op.
    pub fn end_frame(&mut self) {
        match self.sync_depth {
            0 => {}
            1 => {
                self.sync_depth = 0;
                self.push_chunk(ansi::SYNC_END.to_vec());
            }
            _ => self.sync_depth -= 1,
        }
    }

    /// Join all pending chunks into one buffer, write it to the target, and
    /// flush the target. Tracked cursor/color state carries over to the next
    /// frame. On error the pending chunks are retained for retry.
    pub fn flush(&mut self) -> io::Result<()> {
        let total: usize = self.pending_len();
        if total > 0 {
            let mut joined = Vec::with_capacity(total);
            for chunk in &self.chunks {
                joined.extend_from_slice(chunk);
            }
            self.writer.write_all(&joined)?;
        }
        self.writer.flush()?;
        self.chunks.clear();
        if let Some(stats) = self.stats.as_mut() {
            stats.bytes_flushed += total as u64;
            stats.flushes += 1;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(bytes = total, "flushed output frame");
        Ok(())
    }

    /// Flush any pending output and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Advance the tracked column by `cells`, wrapping into following rows
    /// at the tracked width. A zero width leaves nothing to wrap against, so
    /// the cursor becomes unknown.
    fn advance(&mut self, cells: u16) {
        if cells == 0 {
            return;
        }
        let Some((x, y)) = self.cursor else {
            return;
        };
        if self.width == 0 {
            self.cursor = None;
            return;
        }
        let width = u32::from(self.width);
        let total = u32::from(x) + u32::from(cells);
        let col = (total % width) as u16;
        let rows = u16::try_from(total / width).unwrap_or(u16::MAX);
        self.cursor = Some((col, y.saturating_add(rows)));
    }

    fn push_chunk(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.chunks += 1;
        }
        self.chunks.push(chunk);
    }

    fn note_elided(&mut self) {
        if let Some(stats) = self.stats.as_mut() {
            stats.elided += 1;
        }
    }
}
