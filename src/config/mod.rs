//! Configuration for the REPL
//!
//! Prompts, banner text, colours, notices and history bounds. Every section
//! has defaults, so a partial file (or none) is fine.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ansi::Color;
use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt strings
    pub prompt: PromptConfig,

    /// Welcome banner
    pub banner: BannerConfig,

    /// Output colours
    pub colors: ColorConfig,

    /// Statement history
    pub history: HistoryConfig,

    /// Status notices
    pub messages: MessageConfig,
}

impl ReplConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ReplConfig = toml::from_str(content).map_err(|e| Error::ConfigParseFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigSerializationFailed {
            format: "TOML".to_string(),
            reason: e.to_string(),
        })
    }

    /// Load from a file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        ConfigLoader::load_from_path(path)
    }

    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.prompt.primary.is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "prompt.primary".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.prompt.continuation.is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "prompt.continuation".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.history.max_entries == Some(0) {
            return Err(Error::ConfigValidationFailed {
                field: "history.max_entries".to_string(),
                reason: "must be at least 1 (omit for unbounded)".to_string(),
            });
        }
        Ok(())
    }
}

/// Prompt strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Prompt for a new statement
    pub primary: String,

    /// Prompt for a continuation line
    pub continuation: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            primary: ">>> ".to_string(),
            continuation: "... ".to_string(),
        }
    }
}

/// Welcome banner shown on start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Show the banner at all
    pub enabled: bool,

    /// Title line, also shown alone after a clear
    pub title: String,

    /// Lines under the title
    pub lines: Vec<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Welcome to the Python REPL".to_string(),
            lines: vec![
                "Python 3.11 | Pyodide Environment".to_string(),
                "Type code and press Enter to execute".to_string(),
            ],
        }
    }
}

/// Colours for each kind of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub prompt: Color,
    pub result: Color,
    pub error: Color,
    /// Informational lines such as the editor-code header
    pub info: Color,
    /// Positive notices (interpreter ready)
    pub notice: Color,
    /// Waiting notices (interpreter loading)
    pub pending: Color,
    pub banner_border: Color,
    pub banner_title: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            prompt: Color::Cyan,
            result: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            notice: Color::Green,
            pending: Color::Yellow,
            banner_border: Color::Cyan,
            banner_title: Color::BrightMagenta,
        }
    }
}

/// Statement history settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Keep at most this many statements; unbounded when absent
    pub max_entries: Option<usize>,
}

/// Status notice texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub loading: String,
    pub ready: String,
    pub not_ready: String,
    /// Header written before code sent from an editor
    pub editor_header: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            loading: "Python environment is loading...".to_string(),
            ready: "Python environment ready!".to_string(),
            not_ready: "Python environment not ready yet".to_string(),
            editor_header: "# Code from editor:".to_string(),
        }
    }
}
