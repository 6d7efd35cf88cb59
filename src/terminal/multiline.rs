//! Continuation line buffer

/// Lines collected while a statement is still open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultilineBuffer {
    lines: Vec<String>,
}

impl MultilineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finished line as typed
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Close the statement: drop the terminating blank line, join the rest
    /// with `\n`, and empty the buffer.
    pub fn finish(&mut self) -> String {
        if self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        let statement = self.lines.join("\n");
        self.lines.clear();
        statement
    }

    /// Abandon the statement
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
