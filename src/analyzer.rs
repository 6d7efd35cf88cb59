//! Statement completeness check
//!
//! A lexical heuristic, not a parser: it decides whether a typed line must
//! be continued on the next line before it can be executed.

/// Bare keywords that always open a further clause
const CONTINUATION_KEYWORDS: &[&str] = &["elif", "else", "except", "finally"];

/// Returns true if `line` is syntactically incomplete and needs continuation.
///
/// Rules, in priority order:
/// 1. blank lines are complete
/// 2. a trailing backslash continues the line
/// 3. a trailing `:` opens a block
/// 4. a bare `elif`/`else`/`except`/`finally` continues
/// 5. open brackets or an unterminated string continue
///
/// Only a positive leftover depth counts. Surplus closing brackets are
/// already broken input and are left for the interpreter to report.
pub fn is_incomplete(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }

    let tail = line.trim_end();
    if tail.ends_with('\\') || tail.ends_with(':') {
        return true;
    }

    if CONTINUATION_KEYWORDS.contains(&trimmed) {
        return true;
    }

    let scan = LineScan::run(line);
    scan.has_open_bracket() || scan.has_open_string()
}

/// String literal state during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Simple(char),
    Triple(char),
}

/// Bracket and string state at the end of one line
#[derive(Debug, Default, Clone, Copy)]
struct LineScan {
    parens: i32,
    brackets: i32,
    braces: i32,
    open_quote: Option<Quote>,
}

impl LineScan {
    fn run(line: &str) -> Self {
        let chars: Vec<char> = line.chars().collect();
        let mut scan = LineScan::default();
        let mut quote = Quote::None;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            match quote {
                Quote::Triple(delim) => {
                    if is_triple(&chars, i, delim) {
                        quote = Quote::None;
                        i += 3;
                        continue;
                    }
                }
                Quote::Simple(delim) => {
                    if ch == '\\' {
                        // the escaped character never closes the string
                        i += 2;
                        continue;
                    }
                    if ch == delim {
                        quote = Quote::None;
                    }
                }
                Quote::None => match ch {
                    '\'' | '"' if is_triple(&chars, i, ch) => {
                        quote = Quote::Triple(ch);
                        i += 3;
                        continue;
                    }
                    '\'' | '"' => quote = Quote::Simple(ch),
                    '#' => break,
                    '(' => scan.parens += 1,
                    ')' => scan.parens -= 1,
                    '[' => scan.brackets += 1,
                    ']' => scan.brackets -= 1,
                    '{' => scan.braces += 1,
                    '}' => scan.braces -= 1,
                    _ => {}
                },
            }
            i += 1;
        }

        if quote != Quote::None {
            scan.open_quote = Some(quote);
        }
        scan
    }

    fn has_open_bracket(&self) -> bool {
        self.parens > 0 || self.brackets > 0 || self.braces > 0
    }

    fn has_open_string(&self) -> bool {
        self.open_quote.is_some()
    }
}

fn is_triple(chars: &[char], at: usize, delim: char) -> bool {
    chars.len() >= at + 3 && chars[at..at + 3].iter().all(|&c| c == delim)
}
