//! Keystroke decoding and the in-progress input line
//!
//! The widget delivers raw data per keystroke (or per paste). [`parse_keys`]
//! turns that data into [`Key`]s; [`LineEditor`] holds the line being typed.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A decoded keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Printable text, possibly several characters from a paste
    Text(String),
    /// Carriage return or line feed
    Enter,
    /// DEL or BS
    Backspace,
    /// Up arrow (`ESC [ A` or `ESC O A`)
    ArrowUp,
    /// Down arrow (`ESC [ B` or `ESC O B`)
    ArrowDown,
    /// Left arrow; the cursor always sits at end of line, so this is a no-op
    ArrowLeft,
    /// Right arrow; no-op for the same reason
    ArrowRight,
    /// Any other escape or control sequence
    Ignored,
}

/// Decode raw terminal data into keys.
///
/// Runs of printable characters collapse into one [`Key::Text`]. `\r\n`
/// counts as a single Enter.
pub fn parse_keys(data: &str) -> Vec<Key> {
    let chars: Vec<char> = data.chars().collect();
    let mut keys = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if !ch.is_control() {
            text.push(ch);
            i += 1;
            continue;
        }

        if !text.is_empty() {
            keys.push(Key::Text(std::mem::take(&mut text)));
        }

        match ch {
            '\r' => {
                keys.push(Key::Enter);
                if chars.get(i + 1) == Some(&'\n') {
                    i += 1;
                }
                i += 1;
            }
            '\n' => {
                keys.push(Key::Enter);
                i += 1;
            }
            '\x7f' | '\x08' => {
                keys.push(Key::Backspace);
                i += 1;
            }
            '\x1b' => {
                let (key, consumed) = parse_escape(&chars[i..]);
                keys.push(key);
                i += consumed;
            }
            _ => {
                keys.push(Key::Ignored);
                i += 1;
            }
        }
    }

    if !text.is_empty() {
        keys.push(Key::Text(text));
    }
    keys
}

/// Decode one escape sequence starting at `seq[0] == ESC`.
/// Returns the key and the number of chars consumed.
fn parse_escape(seq: &[char]) -> (Key, usize) {
    match seq.get(1) {
        Some('[') | Some('O') => {
            // CSI / SS3: parameters, then a final byte in @..~
            let mut end = 2;
            while let Some(&c) = seq.get(end) {
                if ('@'..='~').contains(&c) {
                    let key = if end == 2 {
                        match c {
                            'A' => Key::ArrowUp,
                            'B' => Key::ArrowDown,
                            'C' => Key::ArrowRight,
                            'D' => Key::ArrowLeft,
                            _ => Key::Ignored,
                        }
                    } else {
                        Key::Ignored
                    };
                    return (key, end + 1);
                }
                end += 1;
            }
            (Key::Ignored, seq.len())
        }
        // a lone ESC before a control key (Alt+Enter, Alt+Backspace) leaves the key intact
        Some(c) if c.is_control() => (Key::Ignored, 1),
        Some(_) => (Key::Ignored, 2),
        None => (Key::Ignored, 1),
    }
}

/// The line currently being typed.
///
/// The cursor always sits at the end of the line. `cursor_offset` is the
/// display width of the line in terminal columns, so it is also the width
/// to erase when the line is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    /// Current line contents
    line: String,
    /// Cursor position in columns
    cursor_offset: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append printable text, returning what should be echoed
    pub fn insert(&mut self, text: &str) -> String {
        let accepted: String = text.chars().filter(|c| !c.is_control()).collect();
        self.line.push_str(&accepted);
        self.cursor_offset = UnicodeWidthStr::width(self.line.as_str());
        accepted
    }

    /// Remove the last grapheme cluster.
    ///
    /// Returns the number of columns it occupied, or `None` on an empty line.
    pub fn backspace(&mut self) -> Option<usize> {
        let (start, _) = self.line.grapheme_indices(true).next_back()?;
        self.line.truncate(start);
        let width = self.cursor_offset - UnicodeWidthStr::width(self.line.as_str());
        self.cursor_offset -= width;
        Some(width)
    }

    /// Finish the line and start a fresh one
    pub fn take(&mut self) -> String {
        self.cursor_offset = 0;
        std::mem::take(&mut self.line)
    }

    /// Replace the whole line (history recall).
    /// Returns the width of the old line, which must be erased on screen.
    pub fn replace(&mut self, text: &str) -> usize {
        let erased = self.cursor_offset;
        self.line = text.to_string();
        self.cursor_offset = UnicodeWidthStr::width(self.line.as_str());
        erased
    }

    /// Drop the line without submitting it
    pub fn clear(&mut self) {
        self.line.clear();
        self.cursor_offset = 0;
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}
