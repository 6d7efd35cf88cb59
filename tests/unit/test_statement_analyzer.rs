//! Unit tests for the statement completeness check
//!
//! These tests walk through the kinds of lines a user types at the prompt
//! and check whether the REPL would ask for a continuation line.

use glassrepl::is_incomplete;

#[cfg(test)]
mod statement_analyzer_tests {
    use super::*;

    #[test]
    fn test_simple_statements_are_complete() {
        assert!(!is_incomplete("1 + 1"));
        assert!(!is_incomplete("x = 42"));
        assert!(!is_incomplete("print('hello')"));
        assert!(!is_incomplete("import math"));
    }

    #[test]
    fn test_blank_line_is_complete() {
        assert!(!is_incomplete(""));
        assert!(!is_incomplete("   "));
    }

    #[test]
    fn test_block_headers_need_continuation() {
        assert!(is_incomplete("def f(x):"));
        assert!(is_incomplete("class Point:"));
        assert!(is_incomplete("for i in range(10):"));
        assert!(is_incomplete("while True:"));
        assert!(is_incomplete("with open(path) as fh:"));
        assert!(is_incomplete("try:"));
    }

    #[test]
    fn test_colon_check_ignores_trailing_whitespace() {
        assert!(is_incomplete("if x:   "));
        assert!(is_incomplete("if x:\t"));
    }

    #[test]
    fn test_backslash_continuation() {
        assert!(is_incomplete("total = a + \\"));
        assert!(is_incomplete("x = 1 \\  "));
    }

    #[test]
    fn test_bare_clause_keywords() {
        for keyword in ["elif", "else", "except", "finally"] {
            assert!(is_incomplete(keyword), "{} should continue", keyword);
            assert!(is_incomplete(&format!("  {}  ", keyword)));
        }
        // keywords with more on the line fall through to the bracket scan
        assert!(!is_incomplete("else_value = 3"));
        assert!(!is_incomplete("x = a if b else c"));
    }

    #[test]
    fn test_unclosed_brackets() {
        assert!(is_incomplete("print("));
        assert!(is_incomplete("x = [1, 2,"));
        assert!(is_incomplete("d = {'a': 1,"));
        assert!(is_incomplete("f(g(h(1), 2)"));
    }

    #[test]
    fn test_balanced_brackets() {
        assert!(!is_incomplete("f(g(h(1), 2))"));
        assert!(!is_incomplete("x = [(1, 2), {3: 4}]"));
    }

    #[test]
    fn test_brackets_in_strings_do_not_count() {
        assert!(!is_incomplete("print(\"(\")"));
        assert!(!is_incomplete("s = '[{('"));
        assert!(!is_incomplete("s = \"it's (fine\""));
    }

    #[test]
    fn test_escaped_quotes_stay_inside_string() {
        assert!(!is_incomplete(r#"s = "say \"hi\"""#));
        assert!(is_incomplete(r#"s = "unterminated \""#));
    }

    #[test]
    fn test_triple_quoted_strings() {
        assert!(is_incomplete("\"\"\""));
        assert!(is_incomplete("doc = '''start of a docstring"));
        assert!(!is_incomplete("doc = \"\"\"one line\"\"\""));
        assert!(!is_incomplete("doc = '''has ( inside'''"));
    }

    #[test]
    fn test_extra_closing_bracket_is_complete() {
        assert!(!is_incomplete("print(1))"));
        assert!(!is_incomplete("]"));
    }

    #[test]
    fn test_comments_are_not_scanned() {
        assert!(!is_incomplete("x = 1  # see f("));
        assert!(!is_incomplete("# [todo"));
        assert!(!is_incomplete("s = '#('"));
    }
}
