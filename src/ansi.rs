//! ANSI styling for REPL output
//!
//! The REPL writes coloured prompts, results and errors to an xterm-like
//! surface. Colours are configured by name and rendered as SGR sequences.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// SGR reset sequence
pub const RESET: &str = "\x1b[0m";

static ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("static ANSI regex is valid")
});

/// Named terminal colours understood by the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightMagenta,
    /// No styling at all
    Plain,
}

impl Color {
    /// SGR parameter for this colour, `None` for [`Color::Plain`]
    pub fn sgr(self) -> Option<&'static str> {
        match self {
            Color::Black => Some("30"),
            Color::Red => Some("31"),
            Color::Green => Some("32"),
            Color::Yellow => Some("33"),
            Color::Blue => Some("34"),
            Color::Magenta => Some("35"),
            Color::Cyan => Some("36"),
            Color::White => Some("37"),
            Color::BrightMagenta => Some("1;35"),
            Color::Plain => None,
        }
    }

    /// Wrap `text` in this colour
    pub fn paint(self, text: &str) -> String {
        match self.sgr() {
            Some(code) => format!("\x1b[{}m{}{}", code, text, RESET),
            None => text.to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightMagenta => "bright_magenta",
            Color::Plain => "plain",
        };
        f.write_str(name)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            "bright_magenta" | "bright-magenta" => Ok(Color::BrightMagenta),
            "plain" | "none" => Ok(Color::Plain),
            other => Err(Error::UnknownColor {
                name: other.to_string(),
            }),
        }
    }
}

/// Remove all CSI escape sequences from `text`
pub fn strip_ansi(text: &str) -> String {
    ESCAPE_REGEX.replace_all(text, "").into_owned()
}
