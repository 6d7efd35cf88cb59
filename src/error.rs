//! Error types and Result aliases for the REPL controller
//!
//! Errors here never reach the user typing at the prompt. Execution failures
//! are reported on the terminal by the coordinator; this type covers the
//! host-facing surface (configuration, logging setup, I/O).

use std::fmt;
use std::path::PathBuf;

/// Result type alias for REPL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the REPL controller
#[derive(Debug)]
pub enum Error {
    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to save configuration file
    ConfigSaveFailed { path: PathBuf, reason: String },

    /// Configuration validation failed
    ConfigValidationFailed { field: String, reason: String },

    /// Failed to serialize configuration
    ConfigSerializationFailed { format: String, reason: String },

    /// Failed to parse configuration
    ConfigParseFailed { format: String, reason: String },

    /// Unknown colour name in configuration
    UnknownColor { name: String },

    // === Session errors ===
    /// An interpreter is already attached to the session
    InterpreterAlreadyAttached,

    /// The session event channel was closed
    SessionClosed,

    // === Logging ===
    /// Failed to install the tracing subscriber
    LoggingInitFailed { reason: String },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigSaveFailed { path, reason } => {
                write!(f, "Failed to save config to '{}': {}", path.display(), reason)
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::UnknownColor { name } => {
                write!(f, "Unknown colour: '{}'", name)
            }

            // Session errors
            Error::InterpreterAlreadyAttached => {
                write!(f, "An interpreter is already attached to this session")
            }
            Error::SessionClosed => {
                write!(f, "Session event channel closed")
            }

            Error::LoggingInitFailed { reason } => {
                write!(f, "Failed to initialize logging: {}", reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}
