//! GlassREPL - an embeddable REPL controller for sandboxed interpreters
//!
//! This library is the brain behind an interactive console widget: it turns
//! raw keystrokes into executed statements, supports multi-line constructs
//! and command history, and lets the running program call `input()` through
//! the host without freezing the terminal.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`session`] - The REPL state machine and its event loop
//! - [`analyzer`] - Lexical check for statements that need continuation
//! - [`history`] - In-memory statement history with arrow-key recall
//! - [`bridge`] - Host side of the interpreter's `input()` call
//! - [`execution`] - Output capture, statement execution and reporting
//! - [`interpreter`] - The interpreter contract
//!
//! ### Terminal Surface
//!
//! - [`terminal`] - Display sink, key decoding, line editor, continuation buffer
//! - [`ansi`] - Colours and escape stripping
//!
//! ### Utilities
//!
//! - [`config`] - TOML/JSON configuration
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use glassrepl::{MemoryDisplay, ReplConfig, Session, SessionHandle};
//! # use glassrepl::{ExecutionError, InputRequester, Interpreter, StreamKind};
//! # struct MyInterpreter;
//! # #[async_trait::async_trait(?Send)]
//! # impl Interpreter for MyInterpreter {
//! #     async fn run_statement(&mut self, _: &str) -> Result<Option<String>, ExecutionError> { Ok(None) }
//! #     fn redirect_output(&mut self) -> Result<(), ExecutionError> { Ok(()) }
//! #     fn captured(&mut self, _: StreamKind) -> Result<String, ExecutionError> { Ok(String::new()) }
//! #     fn restore_output(&mut self) -> Result<(), ExecutionError> { Ok(()) }
//! #     fn register_input_callback(&mut self, _: InputRequester) {}
//! # }
//!
//! # async fn example() -> glassrepl::Result<()> {
//! let mut session = Session::with_interpreter(MyInterpreter, MemoryDisplay::new(), ReplConfig::default());
//! let (handle, events) = SessionHandle::channel();
//!
//! handle.keystroke("1 + 1\r")?;
//! drop(handle);
//! session.run(events).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! A session runs on a single task. Keystrokes, input requests from the
//! interpreter and the statement in flight are multiplexed with
//! `tokio::select!`; nothing is handled concurrently, yet a statement parked
//! on `input()` never blocks typing.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod analyzer;
pub mod ansi;
pub mod bridge;
pub mod config;
pub mod error;
pub mod execution;
pub mod history;
pub mod interpreter;
pub mod session;
pub mod terminal;

// Re-exports for core functionality
pub use analyzer::is_incomplete;
pub use bridge::{InputBridge, InputRequest, InputRequester};
pub use config::{ConfigLoader, ReplConfig};
pub use error::{Error, Result};
pub use execution::{ExecutionCoordinator, ExecutionOutcome, OutputCapture};
pub use history::{HistoryLog, Recall};
pub use interpreter::{ExecutionError, Interpreter, StreamKind};
pub use session::{Mode, Session, SessionEvent, SessionHandle};
pub use terminal::{Key, LineEditor, MemoryDisplay, MultilineBuffer, TerminalDisplay, WriterDisplay};

use tracing_subscriber::EnvFilter;

// Version information
/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install a formatted tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice
/// returns an error instead of panicking.
///
/// # Examples
///
/// ```no_run
/// glassrepl::init_logging("glassrepl=debug").expect("logging already initialized");
/// ```
pub fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| Error::LoggingInitFailed {
            reason: e.to_string(),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::LoggingInitFailed {
            reason: e.to_string(),
        })?;

    info!("{} v{} logging initialized", NAME, VERSION);
    Ok(())
}
