//! Unit tests for line editing
//!
//! Key decoding, the single-line editor, the continuation buffer and
//! history recall, exercised through the public API.

use glassrepl::history::Recall;
use glassrepl::terminal::parse_keys;
use glassrepl::{HistoryLog, Key, LineEditor, MultilineBuffer};

#[cfg(test)]
mod key_decoding_tests {
    use super::*;

    #[test]
    fn test_typed_text_and_enter() {
        assert_eq!(
            parse_keys("x = 1\r"),
            vec![Key::Text("x = 1".to_string()), Key::Enter]
        );
    }

    #[test]
    fn test_crlf_is_one_enter() {
        assert_eq!(
            parse_keys("a\r\nb\n"),
            vec![
                Key::Text("a".to_string()),
                Key::Enter,
                Key::Text("b".to_string()),
                Key::Enter,
            ]
        );
    }

    #[test]
    fn test_both_backspace_codes() {
        assert_eq!(parse_keys("\x7f\x08"), vec![Key::Backspace, Key::Backspace]);
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            parse_keys("\x1b[A\x1b[B\x1bOC\x1b[D"),
            vec![Key::ArrowUp, Key::ArrowDown, Key::ArrowRight, Key::ArrowLeft]
        );
    }

    #[test]
    fn test_other_sequences_are_ignored() {
        let keys = parse_keys("\x1b[3~a");
        assert_eq!(keys, vec![Key::Ignored, Key::Text("a".to_string())]);
    }

    #[test]
    fn test_unicode_text() {
        assert_eq!(parse_keys("π≈3"), vec![Key::Text("π≈3".to_string())]);
    }
}

#[cfg(test)]
mod line_editor_tests {
    use super::*;

    #[test]
    fn test_offset_tracks_columns() {
        let mut editor = LineEditor::new();
        editor.insert("héllo");
        assert_eq!(editor.line(), "héllo");
        assert_eq!(editor.cursor_offset(), 5);

        assert_eq!(editor.backspace(), Some(1));
        assert_eq!(editor.line(), "héll");
        assert_eq!(editor.cursor_offset(), 4);
    }

    #[test]
    fn test_backspace_removes_wide_and_combined_clusters() {
        let mut editor = LineEditor::new();
        editor.insert("x中");
        assert_eq!(editor.cursor_offset(), 3);
        assert_eq!(editor.backspace(), Some(2));
        assert_eq!(editor.line(), "x");

        // decomposed é: base letter plus U+0301 is one column, one cluster
        editor.insert("e\u{301}");
        assert_eq!(editor.cursor_offset(), 2);
        assert_eq!(editor.backspace(), Some(1));
        assert_eq!(editor.line(), "x");
        assert_eq!(editor.cursor_offset(), 1);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.backspace(), None);
        assert_eq!(editor.cursor_offset(), 0);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_take_resets() {
        let mut editor = LineEditor::new();
        editor.insert("print(1)");
        assert_eq!(editor.take(), "print(1)");
        assert!(editor.is_empty());
        assert_eq!(editor.cursor_offset(), 0);
    }

    #[test]
    fn test_replace_returns_previous_width() {
        let mut editor = LineEditor::new();
        editor.insert("abc");
        assert_eq!(editor.replace("longer line"), 3);
        assert_eq!(editor.cursor_offset(), 11);
        assert_eq!(editor.replace(""), 11);
        assert!(editor.is_empty());
    }
}

#[cfg(test)]
mod multiline_buffer_tests {
    use super::*;

    #[test]
    fn test_finish_drops_trailing_blank_line() {
        let mut buffer = MultilineBuffer::new();
        buffer.push("def f():");
        buffer.push("    return 1");
        buffer.push("");
        assert_eq!(buffer.len(), 3);

        assert_eq!(buffer.finish(), "def f():\n    return 1");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_inner_blank_lines_are_kept() {
        let mut buffer = MultilineBuffer::new();
        for line in ["x = [", "", "1]", ""] {
            buffer.push(line);
        }
        assert_eq!(buffer.finish(), "x = [\n\n1]");
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn test_walk_back_and_forward() {
        let mut history = HistoryLog::new();
        history.record("a");
        history.record("b");
        history.record("c");

        assert_eq!(history.older().as_deref(), Some("c"));
        assert_eq!(history.older().as_deref(), Some("b"));
        assert_eq!(history.older().as_deref(), Some("a"));
        assert_eq!(history.older().as_deref(), Some("a"));

        assert_eq!(history.newer(), Some(Recall::Entry("b".to_string())));
        assert_eq!(history.newer(), Some(Recall::Entry("c".to_string())));
        assert_eq!(history.newer(), Some(Recall::Cleared));
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = HistoryLog::new();
        history.record("x");
        history.record("x");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_newer_without_navigation_does_nothing() {
        let mut history = HistoryLog::new();
        history.record("x");
        assert_eq!(history.newer(), None);
        assert_eq!(history.cursor(), None);
    }
}
