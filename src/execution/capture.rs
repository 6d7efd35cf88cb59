//! Scoped output redirection
//!
//! The interpreter's stdout/stderr redirection is global state. An
//! [`OutputCapture`] acquires it on creation and releases it on every exit
//! path: explicit release, early return, cancellation or unwinding.

use crate::interpreter::{Interpreter, StreamKind};

/// Guard holding the interpreter's output redirected to capture buffers
pub struct OutputCapture<'a, I: Interpreter + ?Sized> {
    interpreter: &'a mut I,
    active: bool,
}

impl<'a, I: Interpreter + ?Sized> OutputCapture<'a, I> {
    /// Redirect output. A failed redirect is logged; reads will then come
    /// back empty and release still restores.
    pub fn acquire(interpreter: &'a mut I) -> Self {
        if let Err(e) = interpreter.redirect_output() {
            warn!("Failed to redirect interpreter output: {}", e);
        }
        Self {
            interpreter,
            active: true,
        }
    }

    /// The interpreter, for running statements inside the scope
    pub fn interpreter(&mut self) -> &mut I {
        self.interpreter
    }

    /// Read a captured stream. Read failures count as no output.
    pub fn read(&mut self, stream: StreamKind) -> String {
        match self.interpreter.captured(stream) {
            Ok(text) => text,
            Err(e) => {
                debug!("Could not read captured {:?}: {}", stream, e);
                String::new()
            }
        }
    }

    /// Restore the original streams now
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(first) = self.interpreter.restore_output() {
            warn!("Restoring interpreter output failed, retrying: {}", first);
            if let Err(second) = self.interpreter.restore_output() {
                debug!("Second restore attempt failed: {}", second);
            }
        }
    }
}

impl<I: Interpreter + ?Sized> Drop for OutputCapture<'_, I> {
    fn drop(&mut self) {
        self.restore();
    }
}
