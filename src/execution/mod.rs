//! Statement execution against the interpreter
//!
//! One statement at a time: capture output, run, read back, restore, then
//! report to the terminal.

pub mod capture;

pub use capture::OutputCapture;

use crate::config::ColorConfig;
use crate::interpreter::{ExecutionError, Interpreter, StreamKind};
use crate::terminal::TerminalDisplay;

/// Result of running one statement. Reported once, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Display value of the statement, `None` when null
    pub display_value: Option<String>,
    /// Whether the statement raised
    pub failed: bool,
    /// Failure message when the statement raised
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn success(stdout: String, stderr: String, display_value: Option<String>) -> Self {
        Self {
            stdout,
            stderr,
            display_value,
            failed: false,
            error: None,
        }
    }

    pub fn failure(stderr: String, error: &ExecutionError) -> Self {
        Self {
            stderr,
            failed: true,
            error: Some(error.message()),
            ..Self::default()
        }
    }

    /// Whether either stream produced anything
    pub fn has_output(&self) -> bool {
        !self.stdout.is_empty() || !self.stderr.is_empty()
    }
}

/// Runs statements and writes their outcome to the terminal
#[derive(Debug, Clone)]
pub struct ExecutionCoordinator {
    colors: ColorConfig,
}

impl ExecutionCoordinator {
    pub fn new(colors: ColorConfig) -> Self {
        Self { colors }
    }

    /// Run `source` with output captured.
    ///
    /// The interpreter's original streams are restored before this returns,
    /// and also if the returned future is dropped mid-statement.
    pub async fn execute<I: Interpreter + ?Sized>(
        interpreter: &mut I,
        source: &str,
    ) -> ExecutionOutcome {
        let mut capture = OutputCapture::acquire(interpreter);
        let result = capture.interpreter().run_statement(source).await;

        let outcome = match result {
            Ok(value) => {
                let stdout = capture.read(StreamKind::Stdout);
                let stderr = capture.read(StreamKind::Stderr);
                ExecutionOutcome::success(stdout, stderr, value)
            }
            Err(e) => {
                debug!("Statement raised: {}", e);
                let stderr = capture.read(StreamKind::Stderr);
                ExecutionOutcome::failure(stderr, &e)
            }
        };
        capture.release();
        outcome
    }

    /// Write an outcome: stdout, then stderr in the error colour, then the
    /// display value if nothing else was printed. Failures show stderr, or a
    /// generic message when stderr is empty.
    pub fn report<D: TerminalDisplay + ?Sized>(&self, outcome: &ExecutionOutcome, display: &mut D) {
        if outcome.failed {
            if !outcome.stderr.is_empty() {
                display.write_line(&self.colors.error.paint(trim_newline(&outcome.stderr)));
            } else {
                let message = outcome.error.as_deref().unwrap_or("unknown error");
                display.write_line(&self.colors.error.paint(&format!("Error: {}", message)));
            }
            return;
        }

        if !outcome.stdout.is_empty() {
            display.write_line(trim_newline(&outcome.stdout));
        }
        if !outcome.stderr.is_empty() {
            display.write_line(&self.colors.error.paint(trim_newline(&outcome.stderr)));
        }
        if !outcome.has_output() {
            if let Some(value) = outcome.display_value.as_deref().filter(|v| !v.is_empty()) {
                display.write_line(&self.colors.result.paint(value));
            }
        }
    }
}

/// Captured streams usually end with a newline; `write_line` adds its own
fn trim_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}
