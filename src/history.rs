//! In-memory statement history
//!
//! Holds every statement submitted for execution, in execution order, and a
//! browsing cursor used by the arrow keys. Nothing is persisted.

use std::collections::VecDeque;

/// Result of moving the browsing cursor towards newer entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// The cursor landed on an entry
    Entry(String),
    /// The cursor moved past the newest entry; the line should be cleared
    Cleared,
}

/// Ordered log of executed statements with cursor-based recall
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    /// Entries, oldest first
    entries: VecDeque<String>,
    /// Browsing position counted back from the newest entry (`None` = not browsing)
    cursor: Option<usize>,
    /// Optional bound on the number of entries kept
    max_entries: Option<usize>,
}

impl HistoryLog {
    /// Create an unbounded history log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history log that drops the oldest entries beyond `max_entries`
    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Append a statement and stop browsing.
    ///
    /// Entries are never deduplicated: running the same statement twice
    /// records it twice.
    pub fn record(&mut self, statement: impl Into<String>) {
        self.entries.push_back(statement.into());
        if let Some(max) = self.max_entries {
            while self.entries.len() > max {
                self.entries.pop_front();
            }
        }
        self.cursor = None;
    }

    /// Entry `index` steps back from the newest (0 = most recent)
    pub fn recall(&self, index: usize) -> Option<&str> {
        let len = self.entries.len();
        if index >= len {
            return None;
        }
        self.entries.get(len - 1 - index).map(String::as_str)
    }

    /// Move one entry older. Returns `None` at the oldest entry or when empty.
    pub fn older(&mut self) -> Option<String> {
        let next = match self.cursor {
            None => 0,
            Some(pos) => pos + 1,
        };
        let entry = self.recall(next)?.to_string();
        self.cursor = Some(next);
        Some(entry)
    }

    /// Move one entry newer. Returns `None` when not browsing.
    pub fn newer(&mut self) -> Option<Recall> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(Recall::Cleared)
            }
            pos => {
                let entry = self.recall(pos - 1)?.to_string();
                self.cursor = Some(pos - 1);
                Some(Recall::Entry(entry))
            }
        }
    }

    /// Stop browsing without touching the entries
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Current browsing position (`None` = not browsing)
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
