//! Terminal surface and line input
//!
//! The REPL treats the terminal as an append-only text sink plus a source of
//! raw keystrokes. Edits are expressed as "erase N columns" rather than
//! cursor addressing, so any xterm-like widget can host a session.

pub mod input;
pub mod multiline;

// Re-exports for convenience
pub use input::{parse_keys, Key, LineEditor};
pub use multiline::MultilineBuffer;

use crate::ansi::strip_ansi;
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Erase sequence for one column: back, blank, back
pub const ERASE_ONE: &str = "\x08 \x08";

/// Output side of the terminal widget.
///
/// Text passed to [`write`](TerminalDisplay::write) may contain ANSI styling
/// and `\n` line breaks. Implementations translate line breaks for their
/// surface if needed.
pub trait TerminalDisplay {
    /// Append text at the current position
    fn write(&mut self, text: &str);

    /// Append text followed by a line break
    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Clear the whole surface
    fn clear(&mut self);

    /// Erase `width` columns to the left of the current position
    fn erase(&mut self, width: usize) {
        for _ in 0..width {
            self.write(ERASE_ONE);
        }
    }
}

impl<T: TerminalDisplay + ?Sized> TerminalDisplay for Box<T> {
    fn write(&mut self, text: &str) {
        (**self).write(text)
    }

    fn write_line(&mut self, text: &str) {
        (**self).write_line(text)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn erase(&mut self, width: usize) {
        (**self).erase(width)
    }
}

/// In-memory display keeping both the raw byte stream and the visible text
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    /// Everything written since the last clear, escapes included
    raw: String,
    /// What a reader would see: styling stripped, erasures applied
    visible: String,
    /// Number of times the surface was cleared
    clears: usize,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw transcript including ANSI sequences and erase sequences
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Visible text with styling removed and erasures applied
    pub fn text(&self) -> &str {
        &self.visible
    }

    /// Visible text split into lines
    pub fn lines(&self) -> Vec<&str> {
        self.visible.lines().collect()
    }

    /// The line the cursor is currently on
    pub fn current_line(&self) -> &str {
        match self.visible.rfind('\n') {
            Some(pos) => &self.visible[pos + 1..],
            None => &self.visible,
        }
    }

    /// How many times the surface was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl TerminalDisplay for MemoryDisplay {
    fn write(&mut self, text: &str) {
        self.raw.push_str(text);
        self.visible.push_str(&strip_ansi(text));
    }

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.raw.push('\n');
        self.visible.push('\n');
    }

    fn clear(&mut self) {
        self.raw.clear();
        self.visible.clear();
        self.clears += 1;
    }

    fn erase(&mut self, width: usize) {
        for _ in 0..width {
            self.raw.push_str(ERASE_ONE);
        }

        // remove whole clusters covering `width` columns; never cross a line break
        let mut remaining = width;
        while remaining > 0 {
            let Some((start, cluster)) = self.visible.grapheme_indices(true).next_back() else {
                break;
            };
            if cluster.contains('\n') {
                break;
            }
            remaining = remaining.saturating_sub(cluster.width());
            self.visible.truncate(start);
        }
    }
}

/// Display over any byte writer in raw mode (line breaks become `\r\n`)
pub struct WriterDisplay<W: Write> {
    writer: W,
}

impl<W: Write> WriterDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.writer.write_all(bytes).and_then(|_| self.writer.flush()) {
            debug!("Terminal write failed: {}", e);
        }
    }
}

impl<W: Write> TerminalDisplay for WriterDisplay<W> {
    fn write(&mut self, text: &str) {
        let translated = text.replace("\r\n", "\n").replace('\n', "\r\n");
        self.emit(translated.as_bytes());
    }

    fn clear(&mut self) {
        // erase screen and scrollback, cursor home
        self.emit(b"\x1b[2J\x1b[3J\x1b[H");
    }
}
