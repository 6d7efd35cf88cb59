//! Property-based tests for the statement completeness check
//!
//! These tests use proptest to generate lines and verify that the check
//! never panics and agrees with bracket and string balance.

use glassrepl::is_incomplete;
use proptest::prelude::*;

fn bracket_pair() -> impl Strategy<Value = (char, char)> {
    prop_oneof![Just(('(', ')')), Just(('[', ']')), Just(('{', '}'))]
}

proptest! {
    #[test]
    fn test_check_doesnt_panic_on_random_input(s in "\\PC*") {
        let _ = is_incomplete(&s);
    }

    #[test]
    fn test_open_bracket_needs_continuation(
        prefix in "[a-z0-9 ]{0,20}",
        (open, close) in bracket_pair(),
    ) {
        let line = format!("{}{}", prefix, open);
        prop_assert!(is_incomplete(&line));

        let closed = format!("{}{}", line, close);
        prop_assert!(!is_incomplete(&closed));
    }

    #[test]
    fn test_brackets_inside_strings_ignored(inner in "[a-z(){}\\[\\] ]{0,20}") {
        let line = format!("print(\"{}\")", inner);
        prop_assert!(!is_incomplete(&line));
    }

    #[test]
    fn test_blank_lines_complete(s in "[ \\t]{0,10}") {
        prop_assert!(!is_incomplete(&s));
    }

    #[test]
    fn test_trailing_colon_always_continues(body in "[a-z0-9 ()\\[\\]\"']{1,20}") {
        let line = format!("{}:", body);
        prop_assert!(is_incomplete(&line));
    }
}
