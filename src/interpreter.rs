//! The sandboxed interpreter as seen by the REPL
//!
//! The session never manages the interpreter's lifecycle. It only drives the
//! output-capture protocol around each statement and registers the input
//! callback once when the interpreter is attached.

use async_trait::async_trait;

use crate::bridge::InputRequester;

/// Which captured stream to read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Failures reported by an interpreter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The statement ran and raised
    #[error("{0}")]
    Raised(String),

    /// Redirecting, reading or restoring the output streams failed
    #[error("output capture failed: {0}")]
    Capture(String),

    /// The interpreter could not run anything at all
    #[error("interpreter unavailable: {0}")]
    Unavailable(String),
}

impl ExecutionError {
    /// Short message suitable for the terminal
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Contract the REPL expects from its interpreter.
///
/// Interpreters live on the session's thread and need not be `Send`.
#[async_trait(?Send)]
pub trait Interpreter {
    /// Run one statement.
    ///
    /// Returns the statement's display value, or `None` when the value is
    /// null. May await the registered input callback while running.
    async fn run_statement(&mut self, source: &str) -> Result<Option<String>, ExecutionError>;

    /// Point stdout and stderr at fresh capture buffers.
    ///
    /// Must be safe to call when a previous redirect was never restored.
    fn redirect_output(&mut self) -> Result<(), ExecutionError>;

    /// Contents captured on `stream` since the last redirect
    fn captured(&mut self, stream: StreamKind) -> Result<String, ExecutionError>;

    /// Put the original streams back. Calling it twice is harmless.
    fn restore_output(&mut self) -> Result<(), ExecutionError>;

    /// Install the `input()` bridge. Called once per session.
    fn register_input_callback(&mut self, requester: InputRequester);
}
